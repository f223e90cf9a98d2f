use std::path::Path;

use dirdelta_fs::FileSystem;

use crate::error::HashResult;
use crate::hasher::DEFAULT_BUFFER_SIZE;

/// Byte-for-byte comparison of two files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExactVerifier {
    buffer_size: usize,
}

impl ExactVerifier {
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Use a different chunk size. Zero is treated as one byte.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Returns `true` iff both files have the same length and the same bytes.
    ///
    /// Files of different sizes are rejected without reading any content.
    /// Otherwise both are read in lockstep and the first differing chunk
    /// stops the comparison. An I/O failure on either file is an error.
    pub fn same_content<F>(&self, fs: &F, a: &Path, b: &Path) -> HashResult<bool>
    where
        F: FileSystem + ?Sized,
    {
        let mut x = fs.open(a)?;
        let mut y = fs.open(b)?;
        let size = x.size();
        if size != y.size() {
            x.close()?;
            y.close()?;
            return Ok(false);
        }

        let chunk = (self.buffer_size as u64).min(size) as usize;
        let mut buf_x = vec![0u8; chunk];
        let mut buf_y = vec![0u8; chunk];
        let mut pos = 0u64;
        let mut same = true;
        while pos < size {
            let len = (size - pos).min(chunk as u64) as usize;
            x.read_exact_at(pos, &mut buf_x[..len])?;
            y.read_exact_at(pos, &mut buf_y[..len])?;
            if buf_x[..len] != buf_y[..len] {
                same = false;
                break;
            }
            pos += len as u64;
        }
        x.close()?;
        y.close()?;
        Ok(same)
    }
}

impl Default for ExactVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirdelta_fs::{FsError, FsOp, InMemoryFileSystem};

    use crate::error::HashError;

    fn verify(fs: &InMemoryFileSystem, a: &str, b: &str) -> HashResult<bool> {
        ExactVerifier::new()
            .with_buffer_size(4)
            .same_content(fs, Path::new(a), Path::new(b))
    }

    #[test]
    fn identical_files_verify() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "0123456789");
        fs.add_file("/b", "0123456789");
        assert!(verify(&fs, "/a", "/b").unwrap());
    }

    #[test]
    fn empty_files_verify() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "");
        fs.add_file("/b", "");
        assert!(verify(&fs, "/a", "/b").unwrap());
    }

    #[test]
    fn difference_in_last_chunk_is_detected() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "0123456789");
        fs.add_file("/b", "012345678X");
        assert!(!verify(&fs, "/a", "/b").unwrap());
    }

    #[test]
    fn size_mismatch_short_circuits_without_reading() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "short");
        fs.add_file("/b", "much longer");
        // Any read would fail; a size mismatch must not need one.
        fs.fail_read_after("/a", 0);
        fs.fail_read_after("/b", 0);
        assert!(!verify(&fs, "/a", "/b").unwrap());
    }

    #[test]
    fn mismatch_stops_before_later_chunks() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "AAAAbbbbcccc");
        fs.add_file("/b", "ZZZZbbbbcccc");
        fs.fail_read_after("/a", 4);
        assert!(!verify(&fs, "/a", "/b").unwrap());
    }

    #[test]
    fn unreadable_file_is_an_error_not_a_difference() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "0123456789");
        fs.add_file("/b", "0123456789");
        fs.fail_read_after("/b", 4);

        let err = verify(&fs, "/a", "/b").unwrap_err();
        assert!(matches!(
            err,
            HashError::Io(FsError::Injected {
                op: FsOp::Read,
                ..
            })
        ));
    }

    #[test]
    fn close_failure_after_equal_content_is_fatal() {
        for failing in ["/a", "/b"] {
            let fs = InMemoryFileSystem::new();
            fs.add_file("/a", "0123456789");
            fs.add_file("/b", "0123456789");
            fs.fail_close(failing);

            let err = verify(&fs, "/a", "/b").unwrap_err();
            assert!(matches!(
                err,
                HashError::Io(FsError::Injected {
                    op: FsOp::Close,
                    ..
                })
            ));
            assert!(err.to_string().contains(failing));
        }
    }

    #[test]
    fn close_failure_after_size_mismatch_is_fatal() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "short");
        fs.add_file("/b", "much longer");
        fs.fail_close("/b");

        assert!(matches!(
            verify(&fs, "/a", "/b"),
            Err(HashError::Io(FsError::Injected {
                op: FsOp::Close,
                ..
            }))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/a", "x");
        assert!(matches!(
            verify(&fs, "/a", "/missing"),
            Err(HashError::Io(FsError::NotFound(_)))
        ));
    }
}
