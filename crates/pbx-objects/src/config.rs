use serde::{Deserialize, Serialize};

/// Configuration for rendering a project document as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Object kinds written on a single line, like the build tool does for
    /// build files and file references.
    pub inline_isas: Vec<String>,
    /// Whether references are annotated with `/* label */` comments.
    pub comments: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            inline_isas: vec!["PBXBuildFile".into(), "PBXFileReference".into()],
            comments: true,
        }
    }
}

impl EncoderConfig {
    /// Returns `true` if objects of kind `isa` are written on one line.
    pub fn is_inline(&self, isa: &str) -> bool {
        self.inline_isas.iter().any(|inline| inline == isa)
    }
}
