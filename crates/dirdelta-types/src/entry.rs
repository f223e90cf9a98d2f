//! Path entries and canonical file lists.
//!
//! A [`FileList`] is one side of a directory diff: every file under a root,
//! plus one [`PathEntry::Directory`] for each directory that has no children.
//! Non-empty directories are implied by the files they contain.

use std::borrow::Cow;
use std::ops::Index;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Trailing character that marks a directory in the tagged string form.
pub const DIR_MARKER: char = '/';

/// A file or directory path relative to the root of its [`FileList`].
///
/// Paths always use `/` as the separator. Directory paths are stored without
/// the trailing marker; the marker only appears in [`PathEntry::tagged`] and
/// [`PathEntry::sort_key`]. The list root itself is `Directory("")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathEntry {
    File(String),
    Directory(String),
}

impl PathEntry {
    /// Create a file entry. Rejects paths that end with the directory marker.
    pub fn file(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() || path.ends_with(DIR_MARKER) {
            return Err(TypeError::MarkerInFileName(path));
        }
        Ok(Self::File(path))
    }

    /// Create a directory entry. Trailing markers are stripped.
    pub fn directory(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::Directory(path.trim_end_matches(DIR_MARKER).to_string())
    }

    /// Parse a marker-tagged string: a trailing `/` denotes a directory.
    /// The empty string is the list root.
    pub fn from_tagged(tagged: &str) -> Self {
        if tagged.is_empty() || tagged.ends_with(DIR_MARKER) {
            Self::directory(tagged)
        } else {
            Self::File(tagged.to_string())
        }
    }

    /// The untagged relative path.
    pub fn path(&self) -> &str {
        match self {
            Self::File(p) | Self::Directory(p) => p,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Marker-tagged string form, as used for canonical ordering.
    pub fn tagged(&self) -> String {
        self.sort_key().into_owned()
    }

    /// Canonical ordering key: the path, with a trailing marker for
    /// directories. Lists are sorted byte-wise on this key.
    pub fn sort_key(&self) -> Cow<'_, str> {
        match self {
            Self::File(p) => Cow::Borrowed(p),
            Self::Directory(p) => Cow::Owned(format!("{p}{DIR_MARKER}")),
        }
    }
}

impl std::fmt::Display for PathEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sort_key())
    }
}

/// An ordered list of entries under a single root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    root: PathBuf,
    entries: Vec<PathEntry>,
}

impl FileList {
    /// Create an empty list whose entries resolve against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    /// A one-element list for a single file. The root becomes the file's
    /// parent directory.
    pub fn single_file(path: &Path) -> Result<Self, TypeError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TypeError::InvalidPath(path.display().to_string()))?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut list = Self::new(root);
        list.push(PathEntry::file(name)?);
        Ok(list)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn push(&mut self, entry: PathEntry) {
        self.entries.push(entry);
    }

    /// Sort into canonical order (byte-wise on [`PathEntry::sort_key`]).
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.sort_key().as_bytes().cmp(b.sort_key().as_bytes()));
    }

    /// Returns `true` if the entries are in canonical order.
    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].sort_key().as_bytes() <= w[1].sort_key().as_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// Mutable access for pre-match filtering. Callers that add entries must
    /// use [`PathEntry::file`] / [`PathEntry::directory`] to keep the
    /// file/directory distinction intact.
    pub fn entries_mut(&mut self) -> &mut Vec<PathEntry> {
        &mut self.entries
    }

    pub fn retain(&mut self, f: impl FnMut(&PathEntry) -> bool) {
        self.entries.retain(f);
    }

    /// Filesystem path of an entry.
    pub fn resolve(&self, entry: &PathEntry) -> PathBuf {
        match entry.path() {
            "" => self.root.clone(),
            rel => self.root.join(rel),
        }
    }

    /// Number of file entries (directories excluded).
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// File entries with their list indices.
    pub fn files(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match e {
                PathEntry::File(p) => Some((i, p.as_str())),
                PathEntry::Directory(_) => None,
            })
    }

    /// Directory entries (empty directories) in list order.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            PathEntry::Directory(p) => Some(p.as_str()),
            PathEntry::File(_) => None,
        })
    }
}

impl Index<usize> for FileList {
    type Output = PathEntry;

    fn index(&self, index: usize) -> &PathEntry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
