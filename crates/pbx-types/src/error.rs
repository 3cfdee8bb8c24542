use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier contains whitespace: {0:?}")]
    Whitespace(String),
}
