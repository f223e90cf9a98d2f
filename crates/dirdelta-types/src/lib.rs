//! Foundation types for dirdelta.
//!
//! This crate provides the structural types shared by every stage of a
//! directory diff run. Every other dirdelta crate depends on `dirdelta-types`.
//!
//! # Key Types
//!
//! - [`PathEntry`] -- A file or (empty) directory path relative to a list root
//! - [`FileList`] -- Canonically ordered list of entries for one side of a diff
//! - [`Fingerprint`] -- 64-bit non-cryptographic content digest

pub mod entry;
pub mod error;
pub mod fingerprint;

pub use entry::{FileList, PathEntry, DIR_MARKER};
pub use error::TypeError;
pub use fingerprint::Fingerprint;
