use std::path::Path;

use crate::error::FsResult;
use crate::stream::OpenStream;

/// Kind of a filesystem path, after following symlinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    /// Sockets, devices, FIFOs and anything else that is neither.
    Other,
}

/// A single child yielded by [`FileSystem::read_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirChild {
    pub name: String,
    pub kind: PathKind,
}

impl DirChild {
    pub fn new(name: impl Into<String>, kind: PathKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Returns `true` for the empty name and the `.`/`..` self and parent
    /// links, which never denote content.
    pub fn is_self_or_parent(&self) -> bool {
        matches!(self.name.as_str(), "" | "." | "..")
    }
}

/// A readable byte stream with a size known at open time.
pub trait ContentStream: Send {
    /// Total size of the stream in bytes.
    fn size(&self) -> u64;

    /// Read up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` only
    /// at the end of the stream.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FsResult<usize>;

    /// Release the underlying handle. A failure here is a real error and
    /// must be propagated by the caller.
    fn close(self: Box<Self>) -> FsResult<()>;
}

/// Directory traversal and file stream primitives.
///
/// All implementations must satisfy these invariants:
/// - `read_dir` returns every child of a directory exactly once, in any order.
/// - `open` fails on directories.
/// - All I/O errors are propagated, never silently ignored.
pub trait FileSystem: Send + Sync {
    /// List the direct children of a directory.
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirChild>>;

    /// Open a file as a raw content stream.
    fn open_stream(&self, path: &Path) -> FsResult<Box<dyn ContentStream>>;

    /// Determine whether a path is a file or a directory.
    fn kind(&self, path: &Path) -> FsResult<PathKind>;

    /// Open a file wrapped in a guard that always releases the handle.
    fn open(&self, path: &Path) -> FsResult<OpenStream> {
        let stream = self.open_stream(path)?;
        Ok(OpenStream::new(path, stream))
    }
}
