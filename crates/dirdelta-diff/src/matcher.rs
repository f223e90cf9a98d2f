//! Cross-tree content matching.
//!
//! Pairs each new-tree file with a byte-identical old-tree file, wherever
//! either lives in its tree. Fingerprints narrow the candidates; every
//! candidate is verified byte for byte before it is accepted, so hash
//! collisions never produce a wrong pair.

use std::collections::BTreeSet;

use dirdelta_fs::FileSystem;
use dirdelta_hash::{ContentHasher, ExactVerifier};
use dirdelta_index::HashIndex;
use dirdelta_types::FileList;

use crate::error::DiffResult;
use crate::partition::{MatchPartition, SamePair};

/// Everything a strategy needs to read and compare files.
pub struct MatchContext<'a> {
    pub fs: &'a dyn FileSystem,
    pub hasher: ContentHasher,
    pub verifier: ExactVerifier,
}

impl<'a> MatchContext<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            hasher: ContentHasher::default(),
            verifier: ExactVerifier::default(),
        }
    }
}

/// A way of resolving new-tree files against old-tree files.
pub trait MatchStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Partition the file entries of `old` and `new`.
    fn match_lists(
        &self,
        ctx: &MatchContext<'_>,
        old: &FileList,
        new: &FileList,
    ) -> DiffResult<MatchPartition>;
}

/// Single-pass, first-fit matching in new-list order.
///
/// 1. Every old file is fingerprinted into a [`HashIndex`].
/// 2. Each new file, in list order, is fingerprinted and its candidates are
///    scanned in index order.
/// 3. The first unconsumed candidate that verifies equal is paired and
///    consumed; an old file pairs with at most one new file.
/// 4. New files with no verified candidate go to `new_refs`; old files never
///    consumed go to `old_refs`, ascending.
///
/// Among byte-identical old duplicates the lowest index is taken first.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyFirstFit;

impl MatchStrategy for GreedyFirstFit {
    fn name(&self) -> &'static str {
        "greedy-first-fit"
    }

    fn match_lists(
        &self,
        ctx: &MatchContext<'_>,
        old: &FileList,
        new: &FileList,
    ) -> DiffResult<MatchPartition> {
        let mut index = HashIndex::new();
        let mut unmatched_old = BTreeSet::new();
        for (old_index, _) in old.files() {
            let path = old.resolve(&old[old_index]);
            let fp = ctx.hasher.hash_file(ctx.fs, &path)?;
            index.insert(fp, old_index);
            unmatched_old.insert(old_index);
        }
        tracing::debug!(
            files = index.len(),
            fingerprints = index.bucket_count(),
            shared = index.shared_bucket_count(),
            "indexed old tree"
        );

        let mut partition = MatchPartition::new();
        for (new_index, new_rel) in new.files() {
            let new_path = new.resolve(&new[new_index]);
            let fp = ctx.hasher.hash_file(ctx.fs, &new_path)?;

            let mut found = None;
            for &old_index in index.candidates(&fp) {
                if !unmatched_old.contains(&old_index) {
                    continue;
                }
                let old_path = old.resolve(&old[old_index]);
                if ctx.verifier.same_content(ctx.fs, &old_path, &new_path)? {
                    found = Some(old_index);
                    break;
                }
            }

            match found {
                Some(old_index) => {
                    unmatched_old.remove(&old_index);
                    tracing::debug!(
                        new = new_rel,
                        old = old[old_index].path(),
                        "identical content"
                    );
                    partition.same_pairs.push(SamePair {
                        new_index,
                        old_index,
                    });
                }
                None => partition.new_refs.push(new_index),
            }
        }
        partition.old_refs = unmatched_old.into_iter().collect();

        tracing::info!(
            strategy = self.name(),
            same = partition.same_pairs.len(),
            old_only = partition.old_refs.len(),
            new_only = partition.new_refs.len(),
            "matched trees"
        );
        Ok(partition)
    }
}
