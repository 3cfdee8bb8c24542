//! Error types for plist value access.

use thiserror::Error;

/// Errors produced when a plist value does not have the expected shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlistError {
    /// A value was a different shape than the caller required.
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience type alias for plist operations.
pub type PlistResult<T> = std::result::Result<T, PlistError>;
