use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The base a file element's `path` is interpreted against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceTree {
    /// `<absolute>`: the path is absolute.
    Absolute,
    /// `<group>`: relative to the enclosing group's resolved folder.
    #[default]
    Group,
    /// `SOURCE_ROOT`: relative to the project's source root.
    SourceRoot,
    /// `BUILT_PRODUCTS_DIR`: relative to the build products folder.
    BuildProductsDir,
    /// `SDKROOT`: relative to the active SDK.
    SdkRoot,
    /// `DEVELOPER_DIR`: relative to the developer tools folder.
    DeveloperDir,
    /// `<none>`: no base.
    None,
    /// Any other build-setting name.
    Custom(String),
}

impl SourceTree {
    /// The wire string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Absolute => "<absolute>",
            Self::Group => "<group>",
            Self::SourceRoot => "SOURCE_ROOT",
            Self::BuildProductsDir => "BUILT_PRODUCTS_DIR",
            Self::SdkRoot => "SDKROOT",
            Self::DeveloperDir => "DEVELOPER_DIR",
            Self::None => "<none>",
            Self::Custom(other) => other,
        }
    }

    /// Parse a wire string. Unrecognized names become [`SourceTree::Custom`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "<absolute>" => Self::Absolute,
            "<group>" => Self::Group,
            "SOURCE_ROOT" => Self::SourceRoot,
            "BUILT_PRODUCTS_DIR" => Self::BuildProductsDir,
            "SDKROOT" => Self::SdkRoot,
            "DEVELOPER_DIR" => Self::DeveloperDir,
            "<none>" => Self::None,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SourceTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
