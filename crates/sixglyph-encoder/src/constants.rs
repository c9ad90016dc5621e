use sixglyph_host::Expected;

use crate::error::BootstrapError;
use crate::literal::LiteralExpr;
use crate::number::encode_num;
use crate::verify::{checked, Verifier};

/// Primitive values built from nothing but arrays and coercions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constants {
    pub false_value: LiteralExpr,
    pub true_value: LiteralExpr,
    pub zero: LiteralExpr,
    pub one: LiteralExpr,
    pub nan: LiteralExpr,
    pub undefined: LiteralExpr,
    pub empty_string: LiteralExpr,

    pub false_string: LiteralExpr,
    pub true_string: LiteralExpr,
    pub undefined_string: LiteralExpr,
    pub nan_string: LiteralExpr,
}

impl Constants {
    pub fn derive(verifier: &dyn Verifier) -> Result<Self, BootstrapError> {
        let empty = LiteralExpr::empty_array();

        let false_value = checked(verifier, "false", empty.not(), false)?;
        let true_value = checked(verifier, "true", false_value.not(), true)?;
        let zero = checked(verifier, "0", encode_num(0), 0.0)?;
        let one = checked(verifier, "1", encode_num(1), 1.0)?;
        let nan = checked(
            verifier,
            "NaN",
            LiteralExpr::array_of(&false_value).to_number(),
            f64::NAN,
        )?;
        let undefined = checked(verifier, "undefined", empty.member(&empty), Expected::Undefined)?;
        let empty_string = checked(verifier, "\"\"", LiteralExpr::concat([&empty, &empty]), "")?;

        let false_string = checked(verifier, "\"false\"", false_value.to_str(), "false")?;
        let true_string = checked(verifier, "\"true\"", true_value.to_str(), "true")?;
        let undefined_string = checked(verifier, "\"undefined\"", undefined.to_str(), "undefined")?;
        let nan_string = checked(verifier, "\"NaN\"", nan.to_str(), "NaN")?;

        Ok(Self {
            false_value,
            true_value,
            zero,
            one,
            nan,
            undefined,
            empty_string,
            false_string,
            true_string,
            undefined_string,
            nan_string,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::SkipVerification;
    use sixglyph_host::Harness;

    #[test]
    fn test_constants_verify() {
        let constants = Constants::derive(&Harness::default()).unwrap();
        assert_eq!(constants.false_value.as_str(), "![]");
        assert_eq!(constants.true_value.as_str(), "!![]");
        assert_eq!(constants.nan.as_str(), "+[![]]");
        assert_eq!(constants.undefined.as_str(), "[][[]]");
        assert_eq!(constants.empty_string.as_str(), "[]+[]");
        assert_eq!(constants.undefined_string.as_str(), "[][[]]+[]");
    }

    #[test]
    fn test_constants_do_not_depend_on_verification() {
        assert_eq!(
            Constants::derive(&SkipVerification).unwrap(),
            Constants::derive(&Harness::default()).unwrap()
        );
    }
}
