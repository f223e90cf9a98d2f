use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("file path ends with the directory marker: {0:?}")]
    MarkerInFileName(String),

    #[error("path has no usable file name: {0}")]
    InvalidPath(String),
}
