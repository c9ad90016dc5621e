use logos::Logos;
use miette::SourceSpan;

/// A token spans from `start` to `end` within the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub span: SourceSpan,
}

/// All tokens of the host language subset.
#[derive(Debug, Logos, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    // Multi-character operators
    #[token("===")]
    StrictEq,
    #[token("!==")]
    StrictNe,

    // Single-character operators
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Assign,

    // Punctuation
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // Quotes are kept in the lexeme; the parser unescapes.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    // Keywords are identifiers; the parser tells them apart.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)]
    Whitespace,

    #[error]
    Error,
}
