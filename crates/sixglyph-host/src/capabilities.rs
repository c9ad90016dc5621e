//! The runtime capabilities the encoding technique leans on: built-ins that
//! stringify to their own source, a byte-string/base64 transcoding pair, and
//! construction of callables from program text.

use std::rc::Rc;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::builtins::Builtin;
use crate::config::NativeStyle;
use crate::lexer::lex;
use crate::parser::parse_program;
use crate::value::{Function, ScriptFunction, Value};
use crate::{HostError, HostResult};

/// Any runtime that is to execute encoded output has to provide these.
pub trait Capabilities {
    /// Source text of a built-in, as seen by string coercion.
    fn native_source(&self, builtin: Builtin) -> String;

    /// Byte string (one char per byte) to base64.
    fn encode_base64(&self, input: &str) -> HostResult<String>;

    /// Base64 to byte string (one char per byte).
    fn decode_base64(&self, input: &str) -> HostResult<String>;

    /// Builds a callable taking `params` and running `body`.
    fn construct_function(&self, params: &[String], body: &str) -> HostResult<Value>;
}

/// Forgiving-base64 decoding: optional padding, trailing bits discarded.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Copy)]
pub struct StandardCapabilities {
    style: NativeStyle,
}

impl StandardCapabilities {
    pub fn new(style: NativeStyle) -> Self {
        Self { style }
    }
}

impl Capabilities for StandardCapabilities {
    fn native_source(&self, builtin: Builtin) -> String {
        match self.style {
            NativeStyle::MultiLine => {
                format!("function {}() {{\n    [native code]\n}}", builtin.name())
            }
            NativeStyle::SingleLine => {
                format!("function {}() {{ [native code] }}", builtin.name())
            }
        }
    }

    fn encode_base64(&self, input: &str) -> HostResult<String> {
        let bytes = input
            .chars()
            .map(|c| {
                u8::try_from(u32::from(c)).map_err(|_| {
                    HostError::InvalidCharacter(format!(
                        "The string to be encoded contains characters outside of the \
                         Latin1 range ({:?})",
                        c
                    ))
                })
            })
            .collect::<HostResult<Vec<u8>>>()?;
        Ok(FORGIVING.encode(bytes))
    }

    fn decode_base64(&self, input: &str) -> HostResult<String> {
        let compact: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t' | '\n' | '\u{c}' | '\r'))
            .collect();
        let bytes = FORGIVING.decode(compact.as_bytes()).map_err(|e| {
            HostError::InvalidCharacter(format!(
                "The string to be decoded is not correctly encoded ({})",
                e
            ))
        })?;
        Ok(bytes.into_iter().map(char::from).collect())
    }

    fn construct_function(&self, params: &[String], body: &str) -> HostResult<Value> {
        for param in params {
            let valid = param
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && param
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
            if !valid {
                return Err(HostError::Parser {
                    span: (0, 0).into(),
                    message: format!("Invalid parameter name '{}'", param),
                });
            }
        }

        let tokens = lex(body)?;
        let program = parse_program(&tokens)?;
        let source = format!("function anonymous({}\n) {{\n{}\n}}", params.join(","), body);

        Ok(Value::Function(Rc::new(Function::Script(ScriptFunction {
            params: params.to_vec(),
            body: program.body,
            source,
        }))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_three_spaces_encode_to_icag() {
        let caps = StandardCapabilities::new(NativeStyle::MultiLine);
        assert_eq!(caps.encode_base64("   ").unwrap(), "ICAg");
    }

    #[test]
    fn test_regrouping_lands_p_at_offset_one() {
        let caps = StandardCapabilities::new(NativeStyle::MultiLine);
        assert_eq!(caps.decode_base64("01A0").unwrap(), "\u{d3}P4");
    }

    #[test]
    fn test_forgiving_decode() {
        let caps = StandardCapabilities::new(NativeStyle::MultiLine);
        assert_eq!(caps.decode_base64("aGk").unwrap(), "hi");
        assert_eq!(caps.decode_base64("aG k=").unwrap(), "hi");
        assert!(caps.decode_base64("a").is_err());
        assert!(caps.decode_base64("a*b=").is_err());
    }

    #[test]
    fn test_latin1_round_trip() {
        let caps = StandardCapabilities::new(NativeStyle::MultiLine);
        let encoded = caps.encode_base64("\u{ff}\u{0}A").unwrap();
        assert_eq!(caps.decode_base64(&encoded).unwrap(), "\u{ff}\u{0}A");
        assert!(matches!(
            caps.encode_base64("\u{263a}"),
            Err(HostError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_native_source_styles() {
        let multi = StandardCapabilities::new(NativeStyle::MultiLine);
        let single = StandardCapabilities::new(NativeStyle::SingleLine);
        expect![[r#"
            function at() {
                [native code]
            }"#]]
        .assert_eq(&multi.native_source(Builtin::ArrayAt));
        expect![["function String() { [native code] }"]]
            .assert_eq(&single.native_source(Builtin::String));
    }

    #[test]
    fn test_constructed_function_source() {
        let caps = StandardCapabilities::new(NativeStyle::MultiLine);
        let f = caps
            .construct_function(&["a".to_string()], "return a")
            .unwrap();
        expect![[r#"
            function anonymous(a
            ) {
            return a
            }"#]]
        .assert_eq(&f.to_js_string(&caps));
        assert!(caps.construct_function(&["1a".to_string()], "").is_err());
        assert!(caps.construct_function(&[], "return (").is_err());
    }
}
