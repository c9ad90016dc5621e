use serde::{Deserialize, Serialize};
use sixglyph_host::HostConfig;

use crate::error::BootstrapError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Evaluate every derivation under the host while bootstrapping
    #[serde(default = "default_verify")]
    pub verify: bool,

    /// Host used for verification
    #[serde(default)]
    pub host: HostConfig,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            verify: default_verify(),
            host: HostConfig::default(),
        }
    }
}

fn default_verify() -> bool {
    true
}

impl EncoderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, BootstrapError> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixglyph_host::NativeStyle;

    #[test]
    fn test_defaults_verify() {
        let config = EncoderConfig::from_toml_str("").unwrap();
        assert!(config.verify);
        assert_eq!(config.host, HostConfig::default());
    }

    #[test]
    fn test_nested_host_table() {
        let config = EncoderConfig::from_toml_str(
            r#"
            verify = false

            [host]
            native_style = "single-line"
            "#,
        )
        .unwrap();
        assert!(!config.verify);
        assert_eq!(config.host.native_style, NativeStyle::SingleLine);
        assert_eq!(config.host.global_tag, "Window");
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            EncoderConfig::from_toml_str("verify = \"yes\""),
            Err(BootstrapError::Config(_))
        ));
    }
}
