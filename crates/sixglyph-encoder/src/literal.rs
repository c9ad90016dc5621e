//! Alphabet-only expressions.
//!
//! Every combinator here emits nothing but the six alphabet symbols, so any
//! expression assembled from them stays inside the alphabet.

use std::fmt;

use crate::error::AlphabetError;

pub struct Alphabet;

impl Alphabet {
    pub const SYMBOLS: [char; 6] = ['[', ']', '(', ')', '!', '+'];

    pub fn contains(symbol: char) -> bool {
        Self::SYMBOLS.contains(&symbol)
    }

    pub fn validate(text: &str) -> Result<(), AlphabetError> {
        match text.char_indices().find(|(_, c)| !Self::contains(*c)) {
            Some((offset, symbol)) => Err(AlphabetError { symbol, offset }),
            None => Ok(()),
        }
    }
}

/// An alphabet-only string that evaluates to a specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralExpr(String);

impl LiteralExpr {
    /// Accepts externally supplied text after checking it against the alphabet.
    pub fn parse(text: &str) -> Result<Self, AlphabetError> {
        Alphabet::validate(text)?;
        Ok(Self(text.to_string()))
    }

    pub(crate) fn from_trusted(text: String) -> Self {
        debug_assert!(Alphabet::validate(&text).is_ok(), "non-alphabet output: {}", text);
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `[]`
    pub fn empty_array() -> Self {
        Self("[]".to_string())
    }

    /// `[]+[]`
    pub fn empty_string() -> Self {
        Self("[]+[]".to_string())
    }

    /// `[element]`
    pub fn array_of(element: &LiteralExpr) -> Self {
        Self(format!("[{}]", element.0))
    }

    /// `!expr`
    pub fn not(&self) -> Self {
        Self(format!("!{}", self.unary_operand()))
    }

    /// `+expr`, numeric coercion.
    pub fn to_number(&self) -> Self {
        Self(format!("+{}", self.unary_operand()))
    }

    /// `expr+[]`, string coercion.
    pub fn to_str(&self) -> Self {
        Self::concat([self, &Self::empty_array()])
    }

    /// `expr[key]`
    pub fn member(&self, key: &LiteralExpr) -> Self {
        Self(format!("{}[{}]", self.postfix_operand(), key.0))
    }

    /// `expr(arg)`; the alphabet has no comma, so calls take one argument.
    pub fn call(&self, arg: &LiteralExpr) -> Self {
        Self(format!("{}({})", self.postfix_operand(), arg.0))
    }

    /// `expr()`
    pub fn invoke(&self) -> Self {
        Self(format!("{}()", self.postfix_operand()))
    }

    /// Joins string-valued parts with `+`. No parts yields `[]+[]`.
    ///
    /// Later parts are grouped when splicing them in would change how the
    /// left-associative chain evaluates.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a LiteralExpr>) -> Self {
        let mut out = String::new();

        for (i, part) in parts.into_iter().enumerate() {
            if i == 0 {
                out.push_str(&part.0);
                continue;
            }
            out.push('+');
            let regroup = part.0.starts_with('+')
                || (part.has_top_level_sum() && !part.0.starts_with("[]+"));
            if regroup {
                out.push('(');
                out.push_str(&part.0);
                out.push(')');
            } else {
                out.push_str(&part.0);
            }
        }

        if out.is_empty() {
            return Self::empty_string();
        }
        Self(out)
    }

    /// True when the opening parenthesis is closed by the final character.
    pub fn is_parenthesized(&self) -> bool {
        if !self.0.starts_with('(') {
            return false;
        }
        let mut depth = 0usize;
        for (i, c) in self.0.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i == self.0.len() - 1;
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Parenthesizes unless already parenthesized.
    pub fn wrap(&self) -> Self {
        if self.is_parenthesized() {
            self.clone()
        } else {
            Self(format!("({})", self.0))
        }
    }

    /// A binary `+` outside every bracket and parenthesis.
    fn has_top_level_sum(&self) -> bool {
        let mut depth = 0usize;
        let mut previous = None;
        for c in self.0.chars() {
            match c {
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                '+' if depth == 0 && matches!(previous, Some(')') | Some(']')) => return true,
                _ => {}
            }
            previous = Some(c);
        }
        false
    }

    fn unary_operand(&self) -> String {
        if self.has_top_level_sum() {
            self.wrap().0
        } else {
            self.0.clone()
        }
    }

    fn postfix_operand(&self) -> String {
        if self.0.starts_with(['!', '+']) || self.has_top_level_sum() {
            self.wrap().0
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for LiteralExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LiteralExpr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<LiteralExpr> for String {
    fn from(expr: LiteralExpr) -> Self {
        expr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn lit(text: &str) -> LiteralExpr {
        LiteralExpr::parse(text).unwrap()
    }

    #[test]
    fn test_alphabet_validation() {
        assert!(Alphabet::validate("[]()!+").is_ok());
        assert_eq!(
            Alphabet::validate("[] +[]"),
            Err(AlphabetError {
                symbol: ' ',
                offset: 2
            })
        );
        assert!(LiteralExpr::parse("'a'").is_err());
    }

    #[test]
    fn test_primitive_combinators() {
        let empty = LiteralExpr::empty_array();
        let falsy = empty.not();
        expect![["![]"]].assert_eq(falsy.as_str());
        expect![["!![]"]].assert_eq(falsy.not().as_str());
        expect![["+[![]]"]].assert_eq(LiteralExpr::array_of(&falsy).to_number().as_str());
        expect![["[][[]]"]].assert_eq(empty.member(&empty).as_str());
        expect![["![]+[]"]].assert_eq(falsy.to_str().as_str());
    }

    #[test]
    fn test_wrap_is_balanced() {
        assert!(lit("(![])").is_parenthesized());
        assert!(lit("((![])+[])").is_parenthesized());
        assert!(!lit("(![])+([])").is_parenthesized());
        assert!(!lit("[]").is_parenthesized());
        assert_eq!(lit("(![])+([])").wrap().as_str(), "((![])+([]))");
        assert_eq!(lit("(![])").wrap().as_str(), "(![])");
    }

    #[test]
    fn test_postfix_operands_are_grouped() {
        let key = lit("[]");
        assert_eq!(lit("[]").member(&key).as_str(), "[][[]]");
        assert_eq!(lit("[]+[]").member(&key).as_str(), "([]+[])[[]]");
        assert_eq!(lit("+[]").member(&key).as_str(), "(+[])[[]]");
        assert_eq!(lit("[][[]]").call(&key).invoke().as_str(), "[][[]]([])()");
    }

    #[test]
    fn test_unary_operands_are_grouped() {
        assert_eq!(lit("[]+[]").to_number().as_str(), "+([]+[])");
        assert_eq!(lit("!![]").to_number().as_str(), "+!![]");
    }

    #[test]
    fn test_concat_regroups_numeric_parts() {
        let a = lit("(![]+[])[+[]]");
        let digits = lit("[]+(+!![])");
        let sum = lit("+!![]+!![]");
        let joined = LiteralExpr::concat([&a, &digits, &sum, &a]);
        expect![["(![]+[])[+[]]+[]+(+!![])+(+!![]+!![])+(![]+[])[+[]]"]]
            .assert_eq(joined.as_str());
    }

    #[test]
    fn test_concat_of_nothing_is_the_empty_string() {
        let nothing: Vec<LiteralExpr> = Vec::new();
        assert_eq!(LiteralExpr::concat(&nothing), LiteralExpr::empty_string());
    }
}
