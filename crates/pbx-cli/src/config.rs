use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pbx_objects::EncoderConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory group-relative paths resolve against.
    pub source_root: Option<PathBuf>,
    pub encoder: EncoderConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(c.source_root.is_none());
        assert_eq!(c.encoder, EncoderConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let c = CliConfig::parse(
            r#"
source_root = "/work/App"

[encoder]
comments = false
inline_isas = ["PBXBuildFile"]
"#,
        )
        .unwrap();
        assert_eq!(c.source_root, Some(PathBuf::from("/work/App")));
        assert!(!c.encoder.comments);
        assert_eq!(c.encoder.inline_isas, vec!["PBXBuildFile".to_string()]);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn invalid_config_is_error() {
        assert!(CliConfig::parse("source_root = [").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbx.toml");
        fs::write(&path, "source_root = \"/src\"\n").unwrap();
        let c = CliConfig::load(&path).unwrap();
        assert_eq!(c.source_root, Some(PathBuf::from("/src")));
        assert!(CliConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
