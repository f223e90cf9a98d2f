//! Pre-match filtering of file lists.
//!
//! A [`ListFilter`] sees both canonical lists once per diff run, after
//! listing and before matching, and may add, remove or reorder entries.
//! Closures of the form `FnMut(&mut FileList, &mut FileList)` are filters.

use dirdelta_types::{FileList, PathEntry};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{IndexError, IndexResult};

/// Caller-supplied transformation of the old and new lists.
pub trait ListFilter {
    /// Mutate either list in place. Entries added here must keep the
    /// file/directory distinction of [`PathEntry`].
    fn filter_file_list(&mut self, old: &mut FileList, new: &mut FileList);
}

impl<F> ListFilter for F
where
    F: FnMut(&mut FileList, &mut FileList),
{
    fn filter_file_list(&mut self, old: &mut FileList, new: &mut FileList) {
        self(old, new)
    }
}

/// Filter that leaves both lists untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFilter;

impl ListFilter for NoFilter {
    fn filter_file_list(&mut self, _old: &mut FileList, _new: &mut FileList) {}
}

/// Removes entries whose path matches any of a set of gitignore patterns.
///
/// Patterns are matched against entry paths relative to the list root. A
/// pattern that matches a directory also excludes everything beneath it.
/// Negated patterns (`!keep.log`) re-include paths as in `.gitignore`.
#[derive(Clone, Debug)]
pub struct IgnoreFilter {
    matcher: Gitignore,
}

impl IgnoreFilter {
    pub fn new<I, S>(patterns: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder
                .add_line(None, pattern)
                .map_err(|e| IndexError::Pattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
        }
        let matcher = builder.build().map_err(|e| IndexError::Pattern {
            pattern: String::new(),
            reason: e.to_string(),
        })?;
        Ok(Self { matcher })
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.matcher.num_ignores() as usize + self.matcher.num_whitelists() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Returns `true` if `entry` should be dropped. The list root itself is
    /// never excluded.
    pub fn is_excluded(&self, entry: &PathEntry) -> bool {
        let path = entry.path();
        if path.is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(path, entry.is_dir())
            .is_ignore()
    }

    /// Remove excluded entries in place, keeping the order of the rest.
    /// Returns how many entries were removed.
    pub fn apply(&self, list: &mut FileList) -> usize {
        let before = list.len();
        list.retain(|entry| !self.is_excluded(entry));
        let removed = before - list.len();
        if removed > 0 {
            tracing::debug!(root = %list.root().display(), removed, "filtered entries");
        }
        removed
    }
}

impl ListFilter for IgnoreFilter {
    fn filter_file_list(&mut self, old: &mut FileList, new: &mut FileList) {
        for list in [old, new] {
            let had_entries = !list.is_empty();
            self.apply(list);
            if had_entries && list.is_empty() {
                tracing::warn!(root = %list.root().display(), "filter removed every entry");
            }
        }
    }
}
