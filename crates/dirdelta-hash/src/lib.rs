//! Content fingerprinting and exact verification for dirdelta.
//!
//! The [`ContentHasher`] streams a file into a 64-bit [`Fingerprint`] used to
//! narrow match candidates. Fingerprints are not collision-free, so the
//! [`ExactVerifier`] confirms every candidate byte for byte.
//!
//! [`Fingerprint`]: dirdelta_types::Fingerprint

pub mod error;
pub mod hasher;
pub mod verifier;

pub use error::{HashError, HashResult};
pub use hasher::{ContentHasher, FingerprintAlgorithm, DEFAULT_BUFFER_SIZE};
pub use verifier::ExactVerifier;
