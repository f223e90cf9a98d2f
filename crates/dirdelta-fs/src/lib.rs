//! Filesystem and byte stream primitives for dirdelta.
//!
//! Directory diffing only needs three things from a filesystem: list the
//! children of a directory, tell a file from a directory, and read a file as
//! a sized byte stream. This crate puts those behind the [`FileSystem`]
//! trait so the lister, hasher and verifier can run against the real disk
//! or an in-memory tree with injected faults.
//!
//! # Backends
//!
//! - [`LocalFileSystem`] -- `std::fs`, following symlinks
//! - [`InMemoryFileSystem`] -- map-based tree for tests and embedding
//!
//! # Design Rules
//!
//! 1. All I/O errors are propagated, never silently ignored.
//! 2. Every opened stream is closed on every exit path ([`OpenStream`]).
//! 3. A close failure on the success path is an error, not a warning.

pub mod error;
pub mod local;
pub mod memory;
pub mod stream;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{FsError, FsOp, FsResult};
pub use local::LocalFileSystem;
pub use memory::InMemoryFileSystem;
pub use stream::OpenStream;
pub use traits::{ContentStream, DirChild, FileSystem, PathKind};
