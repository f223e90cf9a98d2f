//! Directory listing and candidate indexing for dirdelta.
//!
//! Turns a directory on a [`FileSystem`] into a canonical [`FileList`],
//! indexes old-tree files by fingerprint, and provides a glob-based filter
//! that callers can plug in before matching.
//!
//! # Key Types
//!
//! - [`list_dir`] -- Depth-first listing with empty-directory preservation
//! - [`HashIndex`] -- Fingerprint to old-index multimap, insertion ordered
//! - [`ListFilter`] -- Pre-match hook over both lists
//! - [`IgnoreFilter`] -- gitignore-style exclusion of entries
//!
//! [`FileSystem`]: dirdelta_fs::FileSystem
//! [`FileList`]: dirdelta_types::FileList

pub mod error;
pub mod filter;
pub mod hash_index;
pub mod lister;

pub use error::{IndexError, IndexResult};
pub use filter::{IgnoreFilter, ListFilter, NoFilter};
pub use hash_index::HashIndex;
pub use lister::list_dir;
