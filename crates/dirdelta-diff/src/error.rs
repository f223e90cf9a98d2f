//! Error types for the diff crate.

use std::path::PathBuf;

use dirdelta_hash::HashError;
use dirdelta_index::IndexError;
use dirdelta_types::TypeError;

/// Errors that can abort a diff run.
///
/// The first failure ends the run; no partial partition is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A directory tree could not be fully enumerated.
    #[error("traversal error: {0}")]
    Traversal(#[from] IndexError),

    /// A file could not be opened, read, or closed while hashing or verifying.
    #[error("I/O error: {0}")]
    Io(#[from] HashError),

    /// A side's path cannot be carried as a list entry.
    #[error("invalid path: {0}")]
    Path(#[from] TypeError),

    /// The directory/file flags or other settings are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A configuration file could not be read.
    #[error("cannot read configuration \"{}\": {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for [`DiffConfig`].
    ///
    /// [`DiffConfig`]: crate::config::DiffConfig
    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The downstream diff stage rejected the plan.
    #[error("diff sink failed: {0}")]
    Sink(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
