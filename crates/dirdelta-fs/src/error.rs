use std::fmt;
use std::path::PathBuf;

/// The filesystem operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsOp {
    OpenDir,
    ReadDir,
    Stat,
    Open,
    Read,
    Close,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OpenDir => "open directory",
            Self::ReadDir => "read directory",
            Self::Stat => "stat",
            Self::Open => "open file",
            Self::Read => "read file",
            Self::Close => "close file",
        };
        f.write_str(s)
    }
}

/// Errors from filesystem and stream operations.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// I/O error from the underlying operating system.
    #[error("failed to {op} \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        op: FsOp,
        #[source]
        source: std::io::Error,
    },

    /// The path does not exist.
    #[error("path not found: \"{}\"", .0.display())]
    NotFound(PathBuf),

    /// A directory operation was attempted on a file, or vice versa.
    #[error("cannot {op} \"{}\": wrong path kind", .path.display())]
    WrongKind { path: PathBuf, op: FsOp },

    /// The stream ended before the declared size was read.
    #[error("short read on \"{}\" at {offset}: want {expected}, got {actual}", .path.display())]
    ShortRead {
        path: PathBuf,
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// A directory child whose name is not valid UTF-8.
    #[error("non UTF-8 file name {name:?} in \"{}\"", .dir.display())]
    NonUtf8Name { dir: PathBuf, name: String },

    /// Failure injected by the in-memory backend.
    #[error("injected failure: cannot {op} \"{}\"", .path.display())]
    Injected { path: PathBuf, op: FsOp },
}

impl FsError {
    pub(crate) fn io(path: impl Into<PathBuf>, op: FsOp, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            op,
            source,
        }
    }
}

/// Result alias for filesystem operations.
pub type FsResult<T> = Result<T, FsError>;
