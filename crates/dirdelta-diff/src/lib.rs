//! Cross-tree content matching for directory deltas.
//!
//! Given an old and a new tree, finds every new file whose content is
//! byte-identical to some old file, wherever either lives, so the binary
//! diff stage can emit a reference instead of re-encoding the bytes.
//!
//! # Key Types
//!
//! - [`DirDiff`] -- Lists, filters and matches two trees, then feeds a [`DiffSink`]
//! - [`MatchStrategy`] / [`GreedyFirstFit`] -- Pairing of new files to old files
//! - [`MatchPartition`] / [`SamePair`] -- Matched pairs, old-only and new-only files
//! - [`DiffConfig`] -- Run settings, loadable from TOML

pub mod config;
pub mod dir_diff;
pub mod error;
pub mod matcher;
pub mod partition;

pub use config::{CompressionConfig, DiffConfig, DEFAULT_MATCH_SCORE};
pub use dir_diff::{DiffPlan, DiffSink, DirDiff};
pub use error::{DiffError, DiffResult};
pub use matcher::{GreedyFirstFit, MatchContext, MatchStrategy};
pub use partition::{MatchPartition, SamePair};
