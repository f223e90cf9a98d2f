//! Error types for the index crate.

use std::path::PathBuf;

use dirdelta_fs::FsError;

/// Errors that can occur while listing trees or building filters.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A directory could not be opened or enumerated.
    #[error("cannot list directory \"{}\": {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// A filter pattern could not be compiled.
    #[error("invalid filter pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
