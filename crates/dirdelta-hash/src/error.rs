use dirdelta_fs::FsError;

/// Errors from hashing and verification.
///
/// Every failure is an I/O failure on a specific path; there is no fallback
/// that treats an unreadable file as "different".
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("{0}")]
    Io(#[from] FsError),
}

/// Result alias for hashing and verification.
pub type HashResult<T> = Result<T, HashError>;
