use pbx_types::{Identifier, TypeError};

/// Errors from object store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No object is stored under the identifier.
    #[error("object not found: {0}")]
    NotFound(Identifier),

    /// The stored object is not the requested variant.
    #[error("type mismatch for {id}: expected {expected}, found {found}")]
    TypeMismatch {
        id: Identifier,
        expected: &'static str,
        found: String,
    },

    /// A raw token could not be used as an identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] TypeError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
