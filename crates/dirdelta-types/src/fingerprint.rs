use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Fixed-width digest of a file's full content.
///
/// A `Fingerprint` is only a pre-filter: two files with different content may
/// share one. Equality of fingerprints never implies equality of content, so
/// every candidate match must still be verified byte for byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Wrap a raw 64-bit value.
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// The raw 64-bit value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Big-endian byte representation.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Hex-encoded string representation (16 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Parse from a 16-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = match hex::decode(s) {
            Ok(bytes) => bytes,
            Err(e) => return Err(TypeError::InvalidHex(e.to_string())),
        };
        let arr: [u8; 8] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypeError::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            })?;
        Ok(Self(u64::from_be_bytes(arr)))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_sixteen_chars_and_zero_padded() {
        let fp = Fingerprint::from_u64(1);
        assert_eq!(fp.to_hex(), "0000000000000001");
        assert_eq!(format!("{fp}"), fp.to_hex());
    }

    #[test]
    fn hex_roundtrip() {
        let fp = Fingerprint::from_u64(0xdead_beef_0123_4567);
        let parsed = Fingerprint::from_hex(&fp.to_hex()).unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Fingerprint::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 8,
                actual: 2,
            }
        );
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            Fingerprint::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(Fingerprint::from_u64(1) < Fingerprint::from_u64(2));
    }

    #[test]
    fn debug_shows_hex() {
        let fp = Fingerprint::from_u64(0xff);
        assert_eq!(format!("{fp:?}"), "Fingerprint(00000000000000ff)");
    }
}
