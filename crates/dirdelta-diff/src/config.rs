use std::path::Path;

use dirdelta_hash::{ContentHasher, ExactVerifier, FingerprintAlgorithm, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Default matching sensitivity handed to the binary-diff engine.
pub const DEFAULT_MATCH_SCORE: usize = 6;

/// Configuration for a directory diff run.
///
/// Only `old_is_dir`, `new_is_dir`, `buffer_size` and `fingerprint` are
/// interpreted here. The remaining fields are carried through to the
/// downstream diff stage untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Whether the old side is a directory (otherwise a single file).
    pub old_is_dir: bool,
    /// Whether the new side is a directory (otherwise a single file).
    pub new_is_dir: bool,
    /// Load all old data into memory before diffing.
    pub load_all: bool,
    /// Minimum match score for the binary-diff engine.
    pub match_score: usize,
    /// I/O chunk size for hashing and verification.
    pub buffer_size: usize,
    /// Accumulator used for content fingerprints.
    pub fingerprint: FingerprintAlgorithm,
    /// Compression plugin selection.
    pub compression: CompressionConfig,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            old_is_dir: true,
            new_is_dir: true,
            load_all: false,
            match_score: DEFAULT_MATCH_SCORE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            fingerprint: FingerprintAlgorithm::default(),
            compression: CompressionConfig::default(),
        }
    }
}

/// Names of the compression plugins the diff stage should use. Opaque here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub stream_compressor: Option<String>,
    pub compressor: Option<String>,
    pub decompressor: Option<String>,
}

impl DiffConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> DiffResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> DiffResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| DiffError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&text)
    }

    /// Reject settings no run can succeed with.
    pub fn validate(&self) -> DiffResult<()> {
        if self.buffer_size == 0 {
            return Err(DiffError::Config(
                "buffer_size must be greater than zero".into(),
            ));
        }
        if !self.old_is_dir && !self.new_is_dir {
            return Err(DiffError::Config(
                "neither side is a directory; a directory diff needs at least one".into(),
            ));
        }
        Ok(())
    }

    pub fn hasher(&self) -> ContentHasher {
        ContentHasher::new(self.fingerprint)
            .with_buffer_size(self.buffer_size)
    }

    pub fn verifier(&self) -> ExactVerifier {
        ExactVerifier::new().with_buffer_size(self.buffer_size)
    }
}
