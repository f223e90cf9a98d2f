use std::path::Path;

use dirdelta_fs::FileSystem;
use dirdelta_types::Fingerprint;
use serde::{Deserialize, Serialize};

use crate::error::HashResult;

/// Default I/O chunk size for hashing and verification.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Largest prime below 2^32.
const ADLER64_MOD: u64 = 4_294_967_291;
/// Bytes folded between reductions; keeps the running sums well below 2^64.
const ADLER64_NMAX: usize = 1 << 16;

/// Which accumulator reduces a file to its fingerprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintAlgorithm {
    /// Adler-style cumulative checksum widened to 64 bits. Cheap, weak.
    #[default]
    Adler64,
    /// First 8 bytes of the BLAKE3 digest. Slower, far fewer collisions.
    Blake3,
}

#[derive(Clone, Copy)]
struct Adler64 {
    a: u64,
    b: u64,
}

impl Adler64 {
    /// Seeded with `a = 1, b = 0`.
    const INITIAL: Self = Self { a: 1, b: 0 };

    fn update(&mut self, data: &[u8]) {
        for block in data.chunks(ADLER64_NMAX) {
            for &byte in block {
                self.a += u64::from(byte);
                self.b += self.a;
            }
            self.a %= ADLER64_MOD;
            self.b %= ADLER64_MOD;
        }
    }

    fn finish(self) -> u64 {
        (self.b << 32) | self.a
    }
}

enum Accumulator {
    Adler64(Adler64),
    Blake3(Box<blake3::Hasher>),
}

impl Accumulator {
    fn new(algorithm: FingerprintAlgorithm) -> Self {
        match algorithm {
            FingerprintAlgorithm::Adler64 => Self::Adler64(Adler64::INITIAL),
            FingerprintAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Adler64(adler) => adler.update(data),
            Self::Blake3(hasher) => {
                hasher.update(data);
            }
        }
    }

    fn finish(self) -> Fingerprint {
        match self {
            Self::Adler64(adler) => Fingerprint::from_u64(adler.finish()),
            Self::Blake3(hasher) => {
                let digest = hasher.finalize();
                let mut head = [0u8; 8];
                head.copy_from_slice(&digest.as_bytes()[..8]);
                Fingerprint::from_u64(u64::from_le_bytes(head))
            }
        }
    }
}

/// Streams file content into a [`Fingerprint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentHasher {
    algorithm: FingerprintAlgorithm,
    buffer_size: usize,
}

impl ContentHasher {
    pub fn new(algorithm: FingerprintAlgorithm) -> Self {
        Self {
            algorithm,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Use a different chunk size. Zero is treated as one byte.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn algorithm(&self) -> FingerprintAlgorithm {
        self.algorithm
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Fingerprint in-memory content.
    pub fn hash_bytes(&self, data: &[u8]) -> Fingerprint {
        let mut acc = Accumulator::new(self.algorithm);
        acc.update(data);
        acc.finish()
    }

    /// Fingerprint a file's full content.
    ///
    /// Reads exactly the size reported at open time; a short read or any
    /// other I/O failure is returned as an error naming the path.
    pub fn hash_file<F>(&self, fs: &F, path: &Path) -> HashResult<Fingerprint>
    where
        F: FileSystem + ?Sized,
    {
        let mut stream = fs.open(path)?;
        let size = stream.size();
        let mut buf = vec![0u8; (self.buffer_size as u64).min(size) as usize];
        let mut acc = Accumulator::new(self.algorithm);

        let mut pos = 0u64;
        while pos < size {
            let len = (size - pos).min(buf.len() as u64) as usize;
            stream.read_exact_at(pos, &mut buf[..len])?;
            acc.update(&buf[..len]);
            pos += len as u64;
        }
        stream.close()?;

        let fingerprint = acc.finish();
        tracing::trace!(path = %path.display(), size, %fingerprint, "hashed file");
        Ok(fingerprint)
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new(FingerprintAlgorithm::default())
    }
}
