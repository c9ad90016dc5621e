use crate::error::EncodeError;
use crate::literal::LiteralExpr;

/// Encodes `n` as a sum of ones; zero is `+[]`.
///
/// The output grows linearly with `n`, so callers use this for small values
/// and go through [`encode_digits`] otherwise.
pub fn encode_num(n: u64) -> LiteralExpr {
    if n == 0 {
        return LiteralExpr::from_trusted("+[]".to_string());
    }
    LiteralExpr::from_trusted("+!![]".repeat(n as usize))
}

/// Encodes the decimal string of `n`.
pub fn encode_digits(n: u64) -> LiteralExpr {
    let digits: Vec<u64> = n
        .to_string()
        .bytes()
        .map(|b| u64::from(b - b'0'))
        .collect();
    from_digits(&digits)
}

/// Encodes a string of decimal digits as string concatenation.
///
/// An empty digit string encodes as the empty string.
pub fn encode_num_string(digits: &str) -> Result<LiteralExpr, EncodeError> {
    let digits = digits
        .chars()
        .map(|c| c.to_digit(10).map(u64::from).ok_or(EncodeError::NotADigit(c)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(from_digits(&digits))
}

/// `(expr)[i]`
pub fn get_item(expr: &LiteralExpr, index: u64) -> LiteralExpr {
    expr.wrap().member(&encode_num(index))
}

fn from_digits(digits: &[u64]) -> LiteralExpr {
    if digits.is_empty() {
        return LiteralExpr::empty_string();
    }
    let body = digits
        .iter()
        .map(|d| format!("({})", encode_num(*d)))
        .collect::<Vec<_>>()
        .join("+");
    LiteralExpr::from_trusted(format!("[]+{}", body))
}
