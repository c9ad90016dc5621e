use sixglyph_host::{Expected, Harness};

use crate::error::BootstrapError;
use crate::literal::LiteralExpr;

/// Checks that a derived expression evaluates to what it was derived for.
pub trait Verifier {
    fn verify(
        &self,
        label: &str,
        expr: &LiteralExpr,
        expected: &Expected,
    ) -> Result<(), BootstrapError>;
}

impl Verifier for Harness {
    fn verify(
        &self,
        label: &str,
        expr: &LiteralExpr,
        expected: &Expected,
    ) -> Result<(), BootstrapError> {
        log::trace!("Verifying {} ({} symbols)", label, expr.len());
        self.expect(expr.as_str(), expected)
            .map_err(|source| BootstrapError::Verification {
                label: label.to_string(),
                source,
            })
    }
}

/// Accepts every derivation unchecked.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipVerification;

impl Verifier for SkipVerification {
    fn verify(
        &self,
        _label: &str,
        _expr: &LiteralExpr,
        _expected: &Expected,
    ) -> Result<(), BootstrapError> {
        Ok(())
    }
}

pub(crate) fn checked(
    verifier: &dyn Verifier,
    label: &str,
    expr: LiteralExpr,
    expected: impl Into<Expected>,
) -> Result<LiteralExpr, BootstrapError> {
    verifier.verify(label, &expr, &expected.into())?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_reports_the_label() {
        let harness = Harness::default();
        let expr = LiteralExpr::parse("!![]").unwrap();
        assert!(harness.verify("true", &expr, &true.into()).is_ok());

        let err = harness.verify("false", &expr, &false.into()).unwrap_err();
        assert!(matches!(err, BootstrapError::Verification { label, .. } if label == "false"));
    }

    #[test]
    fn test_skip_verification_accepts_anything() {
        let expr = LiteralExpr::parse("[]").unwrap();
        assert!(SkipVerification.verify("nothing", &expr, &Expected::Global).is_ok());
    }
}
