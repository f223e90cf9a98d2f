use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{FsError, FsOp, FsResult};
use crate::traits::{ContentStream, DirChild, FileSystem, PathKind};

#[derive(Clone, Debug)]
enum Node {
    File(Arc<Vec<u8>>),
    Directory,
}

#[derive(Debug, Default)]
struct Faults {
    open: BTreeSet<PathBuf>,
    read_dir: BTreeSet<PathBuf>,
    close: BTreeSet<PathBuf>,
    /// Reads at or beyond this offset fail.
    read_after: BTreeMap<PathBuf, u64>,
}

/// In-memory, map-based filesystem.
///
/// Intended for tests and embedding. Supports injecting failures on open,
/// directory listing, reads past a given offset, and close, to exercise the
/// abort paths of a diff run. Parent directories are created implicitly.
pub struct InMemoryFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    faults: RwLock<Faults>,
}

impl InMemoryFileSystem {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(BTreeMap::new()),
            faults: RwLock::new(Faults::default()),
        }
    }

    /// Add (or replace) a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut nodes = self.nodes.write().expect("lock poisoned");
        if let Some(parent) = path.parent() {
            insert_dirs(&mut nodes, parent);
        }
        let node = Node::File(Arc::new(content.into()));
        nodes.insert(path.to_path_buf(), node);
    }

    /// Add a directory and its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes.write().expect("lock poisoned");
        insert_dirs(&mut nodes, path.as_ref());
    }

    /// Make `open` fail for this path.
    pub fn fail_open(&self, path: impl AsRef<Path>) {
        let mut faults = self.faults.write().expect("lock poisoned");
        faults.open.insert(path.as_ref().to_path_buf());
    }

    /// Make `read_dir` fail for this path.
    pub fn fail_read_dir(&self, path: impl AsRef<Path>) {
        let mut faults = self.faults.write().expect("lock poisoned");
        faults.read_dir.insert(path.as_ref().to_path_buf());
    }

    /// Make closing a stream on this path fail.
    pub fn fail_close(&self, path: impl AsRef<Path>) {
        let mut faults = self.faults.write().expect("lock poisoned");
        faults.close.insert(path.as_ref().to_path_buf());
    }

    /// Make any read at or beyond `offset` fail, simulating a file that
    /// becomes unreadable part way through.
    pub fn fail_read_after(&self, path: impl AsRef<Path>, offset: u64) {
        let path = path.as_ref().to_path_buf();
        let mut faults = self.faults.write().expect("lock poisoned");
        faults.read_after.insert(path, offset);
    }

    /// Number of files (directories excluded).
    pub fn file_count(&self) -> usize {
        self.nodes
            .read()
            .expect("lock poisoned")
            .values()
            .filter(|n| matches!(n, Node::File(_)))
            .count()
    }
}

fn insert_dirs(nodes: &mut BTreeMap<PathBuf, Node>, dir: &Path) {
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        nodes
            .entry(ancestor.to_path_buf())
            .or_insert(Node::Directory);
    }
}

impl Default for InMemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirChild>> {
        let faults = self.faults.read().expect("lock poisoned");
        if faults.read_dir.contains(path) {
            return Err(FsError::Injected {
                path: path.to_path_buf(),
                op: FsOp::OpenDir,
            });
        }
        let nodes = self.nodes.read().expect("lock poisoned");
        match nodes.get(path) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => {
                return Err(FsError::WrongKind {
                    path: path.to_path_buf(),
                    op: FsOp::OpenDir,
                })
            }
            None => return Err(FsError::NotFound(path.to_path_buf())),
        }
        let children = nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_str()?;
                let kind = match node {
                    Node::File(_) => PathKind::File,
                    Node::Directory => PathKind::Directory,
                };
                Some(DirChild::new(name, kind))
            })
            .collect();
        Ok(children)
    }

    fn open_stream(&self, path: &Path) -> FsResult<Box<dyn ContentStream>> {
        let faults = self.faults.read().expect("lock poisoned");
        if faults.open.contains(path) {
            return Err(FsError::Injected {
                path: path.to_path_buf(),
                op: FsOp::Open,
            });
        }
        let nodes = self.nodes.read().expect("lock poisoned");
        match nodes.get(path) {
            Some(Node::File(data)) => Ok(Box::new(MemoryStream {
                path: path.to_path_buf(),
                data: Arc::clone(data),
                fail_after: faults.read_after.get(path).copied(),
                fail_close: faults.close.contains(path),
            })),
            Some(Node::Directory) => Err(FsError::WrongKind {
                path: path.to_path_buf(),
                op: FsOp::Open,
            }),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }

    fn kind(&self, path: &Path) -> FsResult<PathKind> {
        match self.nodes.read().expect("lock poisoned").get(path) {
            Some(Node::File(_)) => Ok(PathKind::File),
            Some(Node::Directory) => Ok(PathKind::Directory),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }
}

impl std::fmt::Debug for InMemoryFileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFileSystem")
            .field("file_count", &self.file_count())
            .finish()
    }
}

struct MemoryStream {
    path: PathBuf,
    data: Arc<Vec<u8>>,
    fail_after: Option<u64>,
    fail_close: bool,
}

impl ContentStream for MemoryStream {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FsResult<usize> {
        if self.fail_after.is_some_and(|limit| offset >= limit) {
            return Err(FsError::Injected {
                path: self.path.clone(),
                op: FsOp::Read,
            });
        }
        let start = (offset as usize).min(self.data.len());
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn close(self: Box<Self>) -> FsResult<()> {
        if self.fail_close {
            return Err(FsError::Injected {
                path: self.path,
                op: FsOp::Close,
            });
        }
        Ok(())
    }
}
