use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::builtins::Builtin;
use crate::config::HostConfig;
use crate::interpreter::Host;
use crate::value::{number_to_string, Value};
use crate::HostError;

/// What an expression is expected to evaluate to.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Undefined,
    Bool(bool),
    /// A NaN expectation matches any NaN result.
    Number(f64),
    Str(String),
    Builtin(Builtin),
    Global,
}

impl Expected {
    pub fn matches(&self, value: &Value, host: &Host) -> bool {
        match (self, value) {
            (Expected::Undefined, Value::Undefined) => true,
            (Expected::Bool(a), Value::Bool(b)) => a == b,
            (Expected::Number(a), Value::Number(b)) if a.is_nan() => b.is_nan(),
            (Expected::Number(a), Value::Number(b)) => a == b,
            (Expected::Str(a), Value::Str(b)) => a.as_str() == &**b,
            (Expected::Builtin(b), value) => value.as_builtin() == Some(*b),
            (Expected::Global, value) => host.is_global(value),
            _ => false,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Undefined => write!(f, "undefined"),
            Expected::Bool(b) => write!(f, "{}", b),
            Expected::Number(n) => write!(f, "{}", number_to_string(*n)),
            Expected::Str(s) => write!(f, "{:?}", s),
            Expected::Builtin(b) => write!(f, "[function {}]", b.name()),
            Expected::Global => write!(f, "the global object"),
        }
    }
}

impl From<bool> for Expected {
    fn from(value: bool) -> Self {
        Expected::Bool(value)
    }
}

impl From<f64> for Expected {
    fn from(value: f64) -> Self {
        Expected::Number(value)
    }
}

impl From<&str> for Expected {
    fn from(value: &str) -> Self {
        Expected::Str(value.to_string())
    }
}

impl From<String> for Expected {
    fn from(value: String) -> Self {
        Expected::Str(value)
    }
}

impl From<char> for Expected {
    fn from(value: char) -> Self {
        Expected::Str(value.to_string())
    }
}

impl From<Builtin> for Expected {
    fn from(value: Builtin) -> Self {
        Expected::Builtin(value)
    }
}

#[derive(Debug, Clone, Error, Diagnostic, PartialEq)]
pub enum HarnessError {
    #[error("An error occurred while trying to evaluate `{expression}`")]
    #[diagnostic(code(sixglyph_host::harness::evaluation))]
    Evaluation {
        expression: String,
        #[source]
        #[diagnostic_source]
        source: HostError,
    },

    #[error("`{expression}` did not evaluate to {expected} but to {actual}")]
    #[diagnostic(code(sixglyph_host::harness::mismatch))]
    Mismatch {
        expression: String,
        expected: String,
        actual: String,
    },
}

/// Evaluates expressions under a host and compares them with expectations.
pub struct Harness {
    host: Host,
}

impl Harness {
    pub fn new(config: HostConfig) -> Self {
        Self::with_host(Host::new(config))
    }

    pub fn with_host(host: Host) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn evaluate(&self, expression: &str) -> Result<Value, HarnessError> {
        self.host
            .eval(expression)
            .map_err(|source| HarnessError::Evaluation {
                expression: preview(expression),
                source,
            })
    }

    pub fn expect(&self, expression: &str, expected: &Expected) -> Result<(), HarnessError> {
        let actual = self.evaluate(expression)?;
        log::trace!("{} => {}", preview(expression), actual);

        if expected.matches(&actual, &self.host) {
            Ok(())
        } else {
            Err(HarnessError::Mismatch {
                expression: preview(expression),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

/// Encoded expressions get long; errors show their head only.
fn preview(expression: &str) -> String {
    const LIMIT: usize = 80;
    match expression.char_indices().nth(LIMIT) {
        Some((end, _)) => format!("{}...", &expression[..end]),
        None => expression.to_string(),
    }
}
