use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Opaque identifier of an object inside one project document.
///
/// Identifiers either come from the source document (any non-empty token
/// without whitespace) or are minted by the object store for objects created
/// in memory. The token is shared behind an `Arc`, so cloning an identifier
/// never copies the string. Two identifiers are equal when their tokens are
/// equal, regardless of whether they share an allocation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Parse an identifier from a raw document token.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        if raw.is_empty() {
            return Err(TypeError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(TypeError::Whitespace(raw.to_string()));
        }
        Ok(Self(Arc::from(raw)))
    }

    /// Build an identifier from 12 raw bytes, hex-encoded upper case.
    ///
    /// This is the 24-character form the consuming build tool writes.
    pub fn from_raw_bytes(bytes: [u8; 12]) -> Self {
        Self(Arc::from(hex::encode_upper(bytes)))
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if both identifiers point at the same token allocation.
    ///
    /// Equality only compares contents; this is the stronger "same handle"
    /// check used to verify interning.
    pub fn shares_allocation(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identifier {
    type Error = TypeError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
