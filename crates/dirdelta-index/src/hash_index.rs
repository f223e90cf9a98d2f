//! Fingerprint index over the old tree.

use std::collections::BTreeMap;

use dirdelta_types::Fingerprint;

/// Multimap from [`Fingerprint`] to old-list indices.
///
/// Candidates for one fingerprint are returned in insertion order, so a run
/// over the same lists always scans candidates in the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashIndex {
    buckets: BTreeMap<Fingerprint, Vec<usize>>,
    len: usize,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the old entry at `index` has fingerprint `fp`.
    pub fn insert(&mut self, fp: Fingerprint, index: usize) {
        self.buckets.entry(fp).or_default().push(index);
        self.len += 1;
    }

    /// All indices sharing `fp`, in insertion order.
    pub fn candidates(&self, fp: &Fingerprint) -> &[usize] {
        self.buckets.get(fp).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct fingerprints.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of fingerprints shared by more than one entry, either true
    /// duplicates or hash collisions.
    pub fn shared_bucket_count(&self) -> usize {
        self.buckets.values().filter(|b| b.len() > 1).count()
    }
}

impl FromIterator<(Fingerprint, usize)> for HashIndex {
    fn from_iter<I: IntoIterator<Item = (Fingerprint, usize)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (fp, i) in iter {
            index.insert(fp, i);
        }
        index
    }
}
