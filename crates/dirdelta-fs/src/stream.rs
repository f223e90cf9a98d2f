//! Scoped stream handles.
//!
//! [`OpenStream`] owns a [`ContentStream`] and guarantees it is closed on
//! every exit path. On the success path callers close explicitly with
//! [`OpenStream::close`] so a close failure surfaces as an error. If the
//! guard is dropped while still open (an earlier error is already
//! propagating), the stream is closed on drop and a close failure is logged,
//! since the first error is the one reported.

use std::path::{Path, PathBuf};

use crate::error::{FsError, FsResult};
use crate::traits::ContentStream;

pub struct OpenStream {
    path: PathBuf,
    size: u64,
    inner: Option<Box<dyn ContentStream>>,
}

impl OpenStream {
    pub fn new(path: &Path, stream: Box<dyn ContentStream>) -> Self {
        Self {
            path: path.to_path_buf(),
            size: stream.size(),
            inner: Some(stream),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Fill `buf` completely from `offset`. Anything less is an error.
    pub fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> FsResult<()> {
        // Only `close` and `drop` take the stream, and both consume the guard.
        let stream = self.inner.as_mut().expect("stream is open");
        let mut filled = 0;
        while filled < buf.len() {
            let n = stream.read_at(offset + filled as u64, &mut buf[filled..])?;
            if n == 0 {
                return Err(FsError::ShortRead {
                    path: self.path.clone(),
                    offset,
                    expected: buf.len(),
                    actual: filled,
                });
            }
            filled += n;
        }
        Ok(())
    }

    /// Close the stream, reporting any failure.
    pub fn close(mut self) -> FsResult<()> {
        match self.inner.take() {
            Some(stream) => stream.close(),
            None => Ok(()),
        }
    }
}

impl Drop for OpenStream {
    fn drop(&mut self) {
        if let Some(stream) = self.inner.take() {
            if let Err(e) = stream.close() {
                tracing::warn!(path = %self.path.display(), "close after error failed: {e}");
            }
        }
    }
}

impl std::fmt::Debug for OpenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenStream")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("open", &self.inner.is_some())
            .finish()
    }
}
