pub mod ast;
pub mod builtins;
pub mod capabilities;
pub mod config;
pub mod harness;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

use miette::Diagnostic;
use thiserror::Error;
pub use miette::SourceSpan;

pub use builtins::Builtin;
pub use capabilities::{Capabilities, StandardCapabilities};
pub use config::{HostConfig, NativeStyle};
pub use harness::{Expected, Harness, HarnessError};
pub use interpreter::Host;
pub use value::Value;

/// Errors raised while lexing, parsing or evaluating host programs.
///
/// The runtime variants mirror the exception classes a script would observe.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq)]
pub enum HostError {
    #[error("Lexer error at {span:?}: {message}")]
    #[diagnostic(code(sixglyph_host::lexer))]
    Lexer {
        message: String,
        #[label("unrecognized input")]
        span: SourceSpan,
    },

    #[error("Parser error at {span:?}: {message}")]
    #[diagnostic(code(sixglyph_host::parser))]
    Parser {
        message: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("TypeError: {0}")]
    #[diagnostic(code(sixglyph_host::type_error))]
    Type(String),

    #[error("ReferenceError: {0} is not defined")]
    #[diagnostic(code(sixglyph_host::reference_error))]
    Reference(String),

    #[error("RangeError: {0}")]
    #[diagnostic(code(sixglyph_host::range_error))]
    Range(String),

    #[error("InvalidCharacterError: {0}")]
    #[diagnostic(
        code(sixglyph_host::invalid_character),
        help("btoa only accepts Latin-1 text and atob only accepts base64")
    )]
    InvalidCharacter(String),

    #[error("Invalid host configuration: {0}")]
    #[diagnostic(code(sixglyph_host::config))]
    Config(String),
}

impl From<toml::de::Error> for HostError {
    fn from(err: toml::de::Error) -> Self {
        HostError::Config(err.to_string())
    }
}

/// Result type for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;
