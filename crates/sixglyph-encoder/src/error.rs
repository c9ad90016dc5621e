use miette::Diagnostic;
use sixglyph_host::HarnessError;
use thiserror::Error;

use crate::registry::Phase;

/// Failures while deriving the registry. All of them are fatal: later
/// derivations are built from earlier ones, so nothing is recovered.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq)]
pub enum BootstrapError {
    #[error("Derivation of {label} failed verification")]
    #[diagnostic(
        code(sixglyph_encoder::bootstrap::verification),
        help("every later entry depends on this one; re-verify the whole pipeline after fixing it")
    )]
    Verification {
        label: String,
        #[source]
        #[diagnostic_source]
        source: HarnessError,
    },

    #[error("Character {0:?} is already in the table")]
    #[diagnostic(code(sixglyph_encoder::bootstrap::duplicate_entry))]
    DuplicateEntry(char),

    #[error("Character {character:?} is needed to spell {word:?} but has not been derived yet")]
    #[diagnostic(code(sixglyph_encoder::bootstrap::missing_entry))]
    MissingEntry { character: char, word: String },

    #[error("Phase {found:?} started out of order; expected {expected:?}")]
    #[diagnostic(code(sixglyph_encoder::bootstrap::phase_order))]
    PhaseOrder { expected: Phase, found: Phase },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Encode(#[from] EncodeError),

    #[error("Invalid encoder configuration: {0}")]
    #[diagnostic(code(sixglyph_encoder::config))]
    Config(String),
}

#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
#[error("{symbol:?} at offset {offset} is not one of the six alphabet symbols")]
#[diagnostic(
    code(sixglyph_encoder::alphabet),
    help("only `[`, `]`, `(`, `)`, `!` and `+` may appear")
)]
pub struct AlphabetError {
    pub symbol: char,
    pub offset: usize,
}

#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{0:?} is not a decimal digit")]
    #[diagnostic(code(sixglyph_encoder::encode::not_a_digit))]
    NotADigit(char),

    #[error("{0:?} is not a lowercase ASCII letter")]
    #[diagnostic(code(sixglyph_encoder::encode::not_a_letter))]
    NotALowercaseLetter(char),
}

impl From<toml::de::Error> for BootstrapError {
    fn from(err: toml::de::Error) -> Self {
        BootstrapError::Config(err.to_string())
    }
}
