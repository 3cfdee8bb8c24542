//! Error types for object model operations.

use std::path::PathBuf;

use pbx_store::StoreError;
use pbx_types::Identifier;
use thiserror::Error;

/// Errors that can occur while decoding, editing, or projecting objects.
#[derive(Debug, Error)]
pub enum ObjectsError {
    /// Reference resolution failed (not found or wrong variant).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An object's dictionary is missing a required key or has a key of the
    /// wrong shape.
    #[error("malformed object {id}: {reason}")]
    MalformedObject { id: Identifier, reason: String },

    /// The top-level document is missing a required key or has a key of the
    /// wrong shape.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A filesystem path passed to an editing operation does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A path could not be made absolute.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document has no root project object or it names no main group.
    #[error("project has no root group")]
    MissingRoot,
}

impl ObjectsError {
    /// Returns `true` for any "does not exist" condition: a dangling
    /// reference or a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::NotFound(_)) | Self::FileNotFound(_)
        )
    }

    /// Returns `true` if a reference resolved to an unexpected variant.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Store(StoreError::TypeMismatch { .. }))
    }
}

/// Convenience type alias for object model operations.
pub type ObjectsResult<T> = std::result::Result<T, ObjectsError>;
