use std::fs::{self, File};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{FsError, FsOp, FsResult};
use crate::traits::{ContentStream, DirChild, FileSystem, PathKind};

/// [`FileSystem`] backed by the operating system through `std::fs`.
///
/// Symlinks are followed. Child names that are not valid UTF-8 are rejected
/// with [`FsError::NonUtf8Name`] because entry paths are carried as strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(metadata: &fs::Metadata) -> PathKind {
    if metadata.is_file() {
        PathKind::File
    } else if metadata.is_dir() {
        PathKind::Directory
    } else {
        PathKind::Other
    }
}

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirChild>> {
        let reader = match fs::read_dir(path) {
            Ok(reader) => reader,
            Err(e) => return Err(FsError::io(path, FsOp::OpenDir, e)),
        };
        let mut children = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| FsError::io(path, FsOp::ReadDir, e))?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| FsError::NonUtf8Name {
                    dir: path.to_path_buf(),
                    name: raw.to_string_lossy().into_owned(),
                })?;
            let child_path = entry.path();
            let metadata = match fs::metadata(&child_path) {
                Ok(metadata) => metadata,
                Err(e) => return Err(FsError::io(&child_path, FsOp::Stat, e)),
            };
            children.push(DirChild::new(name, kind_of(&metadata)));
        }
        Ok(children)
    }

    fn open_stream(&self, path: &Path) -> FsResult<Box<dyn ContentStream>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            _ => FsError::io(path, FsOp::Open, e),
        })?;
        let metadata = match file.metadata() {
            Ok(metadata) => metadata,
            Err(e) => return Err(FsError::io(path, FsOp::Stat, e)),
        };
        if !metadata.is_file() {
            return Err(FsError::WrongKind {
                path: path.to_path_buf(),
                op: FsOp::Open,
            });
        }
        Ok(Box::new(LocalStream {
            path: path.to_path_buf(),
            size: metadata.len(),
            file,
        }))
    }

    fn kind(&self, path: &Path) -> FsResult<PathKind> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(kind_of(&metadata)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FsError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(FsError::io(path, FsOp::Stat, e)),
        }
    }
}

struct LocalStream {
    path: PathBuf,
    size: u64,
    file: File,
}

impl ContentStream for LocalStream {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FsResult<usize> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| FsError::io(&self.path, FsOp::Read, e))?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FsError::io(&self.path, FsOp::Read, e)),
            }
        }
        Ok(filled)
    }

    fn close(self: Box<Self>) -> FsResult<()> {
        // std::fs::File reports no error on close for read-only handles.
        drop(self.file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_dir_reports_kinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut children = LocalFileSystem.read_dir(dir.path()).unwrap();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            children,
            vec![
                DirChild::new("a.txt", PathKind::File),
                DirChild::new("sub", PathKind::Directory),
            ]
        );
    }

    #[test]
    fn read_dir_on_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = LocalFileSystem.read_dir(&missing).unwrap_err();
        assert!(matches!(
            err,
            FsError::Io {
                op: FsOp::OpenDir,
                ..
            }
        ));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn open_reads_full_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"0123456789").unwrap();

        let mut stream = LocalFileSystem.open(&path).unwrap();
        assert_eq!(stream.size(), 10);
        let mut buf = [0u8; 4];
        stream.read_exact_at(6, &mut buf).unwrap();
        assert_eq!(&buf, b"6789");
        stream.close().unwrap();
    }

    #[test]
    fn read_past_end_is_short_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small");
        fs::write(&path, b"abc").unwrap();

        let mut stream = LocalFileSystem.open(&path).unwrap();
        let mut buf = [0u8; 8];
        let err = stream.read_exact_at(0, &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FsError::ShortRead {
                expected: 8,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = LocalFileSystem.open(&missing).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn kind_distinguishes_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"").unwrap();
        let fs = LocalFileSystem::new();
        assert_eq!(fs.kind(dir.path()).unwrap(), PathKind::Directory);
        assert_eq!(fs.kind(&file).unwrap(), PathKind::File);
    }
}
