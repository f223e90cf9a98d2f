//! Directory diff orchestration.
//!
//! A run lists both sides, lets the caller filter the lists, matches them,
//! and hands the result to the downstream diff stage. Any listing failure
//! aborts the run before matching starts.

use std::path::Path;

use dirdelta_fs::{FileSystem, PathKind};
use dirdelta_hash::HashError;
use dirdelta_index::{list_dir, IndexError, ListFilter};
use dirdelta_types::{FileList, PathEntry};
use serde::{Deserialize, Serialize};

use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::matcher::{GreedyFirstFit, MatchContext, MatchStrategy};
use crate::partition::MatchPartition;

/// Everything the binary-diff stage needs: both lists, how their files
/// pair up, and the pass-through configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPlan {
    pub old: FileList,
    pub new: FileList,
    pub partition: MatchPartition,
    pub config: DiffConfig,
}

impl DiffPlan {
    /// `(new, old)` entry pairs with identical content.
    pub fn same_entries(&self) -> impl Iterator<Item = (&PathEntry, &PathEntry)> {
        self.partition
            .same_pairs
            .iter()
            .map(|p| (&self.new[p.new_index], &self.old[p.old_index]))
    }

    /// Old files no new file references.
    pub fn old_only(&self) -> impl Iterator<Item = &PathEntry> {
        self.partition.old_refs.iter().map(|&i| &self.old[i])
    }

    /// New files that must be diffed or stored.
    pub fn new_only(&self) -> impl Iterator<Item = &PathEntry> {
        self.partition.new_refs.iter().map(|&i| &self.new[i])
    }
}

/// The downstream diff/compression stage.
pub trait DiffSink {
    type Output;

    fn consume(&mut self, plan: DiffPlan) -> DiffResult<Self::Output>;
}

impl<F, T> DiffSink for F
where
    F: FnMut(DiffPlan) -> DiffResult<T>,
{
    type Output = T;

    fn consume(&mut self, plan: DiffPlan) -> DiffResult<T> {
        self(plan)
    }
}

/// Runs directory diffs against one filesystem with one configuration.
pub struct DirDiff<'a> {
    fs: &'a dyn FileSystem,
    config: DiffConfig,
    strategy: Box<dyn MatchStrategy>,
}

impl<'a> DirDiff<'a> {
    /// Validate `config` and build a runner using [`GreedyFirstFit`].
    pub fn new(fs: &'a dyn FileSystem, config: DiffConfig) -> DiffResult<Self> {
        config.validate()?;
        Ok(Self {
            fs,
            config,
            strategy: Box::new(GreedyFirstFit),
        })
    }

    /// Replace the matching strategy.
    pub fn with_strategy(mut self, strategy: impl MatchStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// List, filter and match both sides.
    pub fn prepare<L>(
        &self,
        old_path: &Path,
        new_path: &Path,
        filter: &mut L,
    ) -> DiffResult<DiffPlan>
    where
        L: ListFilter + ?Sized,
    {
        let mut old = self.list_side("old", old_path, self.config.old_is_dir)?;
        let mut new = self.list_side("new", new_path, self.config.new_is_dir)?;
        filter.filter_file_list(&mut old, &mut new);
        tracing::debug!(
            old_entries = old.len(),
            new_entries = new.len(),
            strategy = self.strategy.name(),
            "filtered lists"
        );

        let ctx = MatchContext {
            fs: self.fs,
            hasher: self.config.hasher(),
            verifier: self.config.verifier(),
        };
        let partition = self.strategy.match_lists(&ctx, &old, &new)?;

        Ok(DiffPlan {
            old,
            new,
            partition,
            config: self.config.clone(),
        })
    }

    /// [`prepare`](Self::prepare), then hand the plan to `sink`.
    pub fn run<L, S>(
        &self,
        old_path: &Path,
        new_path: &Path,
        filter: &mut L,
        sink: &mut S,
    ) -> DiffResult<S::Output>
    where
        L: ListFilter + ?Sized,
        S: DiffSink + ?Sized,
    {
        let plan = self.prepare(old_path, new_path, filter)?;
        sink.consume(plan)
    }

    fn list_side(&self, side: &str, path: &Path, is_dir: bool) -> DiffResult<FileList> {
        // A missing file side is an I/O error; only directories are traversed.
        let kind = self.fs.kind(path).map_err(|source| {
            if is_dir {
                DiffError::from(IndexError::Traversal {
                    path: path.to_path_buf(),
                    source,
                })
            } else {
                DiffError::from(HashError::Io(source))
            }
        })?;
        match (is_dir, kind) {
            (true, PathKind::Directory) => Ok(list_dir(self.fs, path)?),
            (false, PathKind::File) => Ok(FileList::single_file(path)?),
            (true, _) => Err(DiffError::Config(format!(
                "{side} path \"{}\" is configured as a directory but is not one",
                path.display()
            ))),
            (false, _) => Err(DiffError::Config(format!(
                "{side} path \"{}\" is configured as a file but is not one",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Debug for DirDiff<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirDiff")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
