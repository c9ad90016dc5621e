//! Encodes program text into an equivalent program written with only
//! `[`, `]`, `(`, `)`, `!` and `+`.
//!
//! The encoder bootstraps an [`AlphabetRegistry`] once: primitive constants,
//! then a table of characters each reachable by an alphabet-only expression,
//! then a way to run strings as code. [`Compiler`] uses the sealed registry to
//! encode arbitrary text.

pub mod charset;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod literal;
pub mod number;
pub mod registry;
pub mod verify;

use std::sync::OnceLock;

pub use charset::CharacterTable;
pub use compiler::{CompileStats, Compiler};
pub use config::EncoderConfig;
pub use constants::Constants;
pub use error::{AlphabetError, BootstrapError, EncodeError};
pub use executor::Executor;
pub use literal::{Alphabet, LiteralExpr};
pub use number::{encode_digits, encode_num, encode_num_string, get_item};
pub use registry::{AlphabetRegistry, Phase, RegistryBuilder};
pub use verify::{SkipVerification, Verifier};

static REGISTRY: OnceLock<Result<AlphabetRegistry, BootstrapError>> = OnceLock::new();

/// The process-wide registry, bootstrapped and verified on first use.
pub fn registry() -> Result<&'static AlphabetRegistry, BootstrapError> {
    REGISTRY
        .get_or_init(|| AlphabetRegistry::bootstrap(&EncoderConfig::default()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Encodes `text` as an expression evaluating to `text`.
pub fn encode(text: &str) -> Result<LiteralExpr, BootstrapError> {
    Ok(registry()?.compiler().encode(text))
}

/// Encodes `text` as an expression that runs `text` as a program.
pub fn compile(text: &str) -> Result<LiteralExpr, BootstrapError> {
    Ok(registry()?.compiler().compile(text))
}
