//! Recursive directory listing.

use std::path::Path;

use dirdelta_fs::{FileSystem, PathKind};
use dirdelta_types::{FileList, PathEntry};

use crate::error::{IndexError, IndexResult};

/// List every file and every empty directory under `root`.
///
/// Traversal is depth-first. Children named `""`, `"."` or `".."` are
/// skipped. A directory with no usable children is recorded as a
/// [`PathEntry::Directory`] so it survives patch application; an empty root
/// becomes `Directory("")`. The result is sorted into canonical order.
///
/// If any directory cannot be opened or enumerated the whole listing fails;
/// no partial list is returned.
pub fn list_dir<F>(fs: &F, root: &Path) -> IndexResult<FileList>
where
    F: FileSystem + ?Sized,
{
    let mut list = FileList::new(root);
    collect(fs, root, "", &mut list)?;
    list.sort();
    tracing::debug!(
        root = %root.display(),
        entries = list.len(),
        files = list.file_count(),
        "listed directory"
    );
    Ok(list)
}

fn collect<F>(fs: &F, root: &Path, rel: &str, list: &mut FileList) -> IndexResult<()>
where
    F: FileSystem + ?Sized,
{
    let dir = if rel.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rel)
    };
    let children = match fs.read_dir(&dir) {
        Ok(children) => children,
        Err(source) => return Err(IndexError::Traversal { path: dir, source }),
    };

    let mut has_child = false;
    for child in children {
        if child.is_self_or_parent() {
            continue;
        }
        let child_rel = if rel.is_empty() {
            child.name.clone()
        } else {
            format!("{rel}/{}", child.name)
        };
        match child.kind {
            PathKind::File => {
                has_child = true;
                list.push(PathEntry::File(child_rel));
            }
            PathKind::Directory => {
                has_child = true;
                collect(fs, root, &child_rel, list)?;
            }
            PathKind::Other => {
                tracing::warn!(path = %dir.join(&child.name).display(), "skipping special file");
            }
        }
    }

    if !has_child {
        list.push(PathEntry::directory(rel));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use dirdelta_fs::{ContentStream, DirChild, FsResult, InMemoryFileSystem, LocalFileSystem};

    fn tagged(list: &FileList) -> Vec<String> {
        list.iter().map(PathEntry::tagged).collect()
    }

    #[test]
    fn lists_files_sorted() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/r/b.txt", "b");
        fs.add_file("/r/a/x", "x");
        fs.add_file("/r/a.txt", "a");

        let list = list_dir(&fs, Path::new("/r")).unwrap();
        assert_eq!(tagged(&list), vec!["a.txt", "a/x", "b.txt"]);
        assert_eq!(list.root(), Path::new("/r"));
    }

    #[test]
    fn empty_subdirectory_is_listed_once() {
        let fs = InMemoryFileSystem::new();
        fs.add_dir("/old/sub");

        let list = list_dir(&fs, Path::new("/old")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], PathEntry::Directory("sub".into()));
        assert_eq!(tagged(&list), vec!["sub/"]);
    }

    #[test]
    fn non_empty_directories_are_implicit() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/r/full/f", "f");
        fs.add_dir("/r/full/empty");
        fs.add_dir("/r/nested/deeper/deepest");

        let list = list_dir(&fs, Path::new("/r")).unwrap();
        assert_eq!(
            tagged(&list),
            vec!["full/empty/", "full/f", "nested/deeper/deepest/"]
        );
    }

    #[test]
    fn empty_root_is_represented_by_itself() {
        let fs = InMemoryFileSystem::new();
        fs.add_dir("/empty");

        let list = list_dir(&fs, Path::new("/empty")).unwrap();
        assert_eq!(list.entries(), &[PathEntry::Directory(String::new())]);
        assert_eq!(list.resolve(&list[0]), Path::new("/empty"));
    }

    #[test]
    fn unreadable_subdirectory_aborts_listing() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/r/ok/f", "f");
        fs.add_file("/r/locked/g", "g");
        fs.fail_read_dir("/r/locked");

        let err = list_dir(&fs, Path::new("/r")).unwrap_err();
        match err {
            IndexError::Traversal { path, .. } => assert_eq!(path, Path::new("/r/locked")),
            other => panic!("expected Traversal, got {other:?}"),
        }
    }

    #[test]
    fn missing_root_is_traversal_error() {
        let fs = InMemoryFileSystem::new();
        assert!(matches!(
            list_dir(&fs, Path::new("/nope")),
            Err(IndexError::Traversal { .. })
        ));
    }

    struct DotsFs;

    impl FileSystem for DotsFs {
        fn read_dir(&self, path: &Path) -> FsResult<Vec<DirChild>> {
            if path == Path::new("/r") {
                Ok(vec![
                    DirChild::new(".", PathKind::Directory),
                    DirChild::new("..", PathKind::Directory),
                    DirChild::new("", PathKind::File),
                    DirChild::new("fifo", PathKind::Other),
                ])
            } else {
                Ok(Vec::new())
            }
        }

        fn open_stream(&self, path: &Path) -> FsResult<Box<dyn ContentStream>> {
            Err(dirdelta_fs::FsError::NotFound(path.to_path_buf()))
        }

        fn kind(&self, _path: &Path) -> FsResult<PathKind> {
            Ok(PathKind::Directory)
        }
    }

    #[test]
    fn self_parent_and_special_entries_are_not_content() {
        let list = list_dir(&DotsFs, Path::new("/r")).unwrap();
        assert_eq!(list.entries(), &[PathEntry::Directory(String::new())]);
    }

    #[test]
    fn local_tree_recovers_every_file_and_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("a/b")).unwrap();
        std::fs::create_dir_all(root.join("empty1")).unwrap();
        std::fs::create_dir_all(root.join("c/empty2")).unwrap();
        std::fs::write(root.join("a/b/f1"), b"1").unwrap();
        std::fs::write(root.join("c/f2"), b"2").unwrap();
        std::fs::write(root.join("top"), b"3").unwrap();

        let list = list_dir(&LocalFileSystem, root).unwrap();

        let files: BTreeSet<&str> = list.files().map(|(_, p)| p).collect();
        let dirs: BTreeSet<&str> = list.directories().collect();
        assert_eq!(files, BTreeSet::from(["a/b/f1", "c/f2", "top"]));
        assert_eq!(dirs, BTreeSet::from(["c/empty2", "empty1"]));
        assert_eq!(list.len(), files.len() + dirs.len(), "no duplicates");
        assert!(list.is_sorted());
    }
}
