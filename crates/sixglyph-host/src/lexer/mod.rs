pub mod lexer;
pub mod token;

pub use lexer::*;
pub use token::*;

#[cfg(test)]
mod tests {
    use crate::lexer::{lex, TokenKind};

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_six_symbols() {
        assert_eq!(
            kinds("[]()!+"),
            vec![
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Bang,
                TokenKind::Plus,
            ]
        );
    }

    #[test]
    fn test_lex_strict_equality_before_bang() {
        assert_eq!(
            kinds("a !== !b === c"),
            vec![
                TokenKind::Identifier,
                TokenKind::StrictNe,
                TokenKind::Bang,
                TokenKind::Identifier,
                TokenKind::StrictEq,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_lex_statement() {
        let tokens = lex("return 'it\\'s' + 4.5; // done").unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["return", "'it\\'s'", "+", "4.5", ";"]);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[3].kind, TokenKind::Number);
    }

    #[test]
    fn test_lex_non_ascii_string() {
        let tokens = lex("\"h\u{e9}llo \u{1F600}\"").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
    }

    #[test]
    fn test_lex_member_access() {
        assert_eq!(
            kinds("console.log(1, 2)"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_lex_invalid_token() {
        assert!(lex("return #").is_err());
    }

    #[test]
    fn test_lex_empty_input() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex("  \n\t// only a comment").unwrap().is_empty());
    }
}
