use serde::{Deserialize, Serialize};

use crate::HostResult;

/// How built-in functions render when converted to strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NativeStyle {
    /// `function at() {\n    [native code]\n}`
    #[default]
    MultiLine,
    /// `function at() { [native code] }`
    SingleLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Layout of stringified built-in sources
    #[serde(default)]
    pub native_style: NativeStyle,

    /// Class tag of the global object, shown as `[object <tag>]`
    #[serde(default = "default_global_tag")]
    pub global_tag: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            native_style: NativeStyle::default(),
            global_tag: default_global_tag(),
        }
    }
}

pub fn default_global_tag() -> String {
    "Window".to_string()
}

impl HostConfig {
    pub fn from_toml_str(source: &str) -> HostResult<Self> {
        Ok(toml::from_str(source)?)
    }
}
