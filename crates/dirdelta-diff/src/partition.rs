//! The three-way result of matching two file lists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A new-list file whose content is identical to an old-list file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SamePair {
    pub new_index: usize,
    pub old_index: usize,
}

impl SamePair {
    pub fn new(new_index: usize, old_index: usize) -> Self {
        Self {
            new_index,
            old_index,
        }
    }
}

/// Classification of file entries into matched pairs, old-only and new-only.
///
/// - `same_pairs`: one pair per confirmed identical-content match, in new-list
///   order. No old index appears in more than one pair.
/// - `old_refs`: old file indices never matched, ascending.
/// - `new_refs`: new file indices with no identical old file, in new-list
///   order.
///
/// Directory entries appear in none of the three.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPartition {
    pub same_pairs: Vec<SamePair>,
    pub old_refs: Vec<usize>,
    pub new_refs: Vec<usize>,
}

impl MatchPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// The old index paired with `new_index`, if any.
    pub fn pair_for_new(&self, new_index: usize) -> Option<usize> {
        self.same_pairs
            .iter()
            .find(|p| p.new_index == new_index)
            .map(|p| p.old_index)
    }

    /// Old indices consumed by a pair.
    pub fn matched_old(&self) -> BTreeSet<usize> {
        self.same_pairs.iter().map(|p| p.old_index).collect()
    }

    /// Returns `true` when every file on both sides is paired.
    pub fn is_identical(&self) -> bool {
        self.old_refs.is_empty() && self.new_refs.is_empty()
    }

    /// Total number of new files accounted for.
    pub fn new_file_count(&self) -> usize {
        self.same_pairs.len() + self.new_refs.len()
    }

    /// Total number of old files accounted for.
    pub fn old_file_count(&self) -> usize {
        self.same_pairs.len() + self.old_refs.len()
    }
}
