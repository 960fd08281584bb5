//! Chain hash type for transaction identification.
//!
//! A `Hash` is a 32-byte digest stored in internal (wire) byte order and
//! displayed as byte-reversed hex, the convention for transaction IDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte double-SHA-256 digest in internal byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Wrap 32 bytes given in internal order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a slice in internal order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            ))
        })?;
        Ok(Hash(arr))
    }

    /// Parse a display-order (byte-reversed) hex string.
    ///
    /// # Arguments
    /// * `hex_str` - Exactly 64 hex characters.
    ///
    /// # Returns
    /// `Ok(Hash)` with the bytes restored to internal order.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let mut bytes = hex::decode(hex_str)?;
        bytes.reverse();
        Hash::from_bytes(&bytes)
    }

    /// Access the internal byte array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Check whether every byte is zero (the null hash).
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

/// Display as byte-reversed hex.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute double SHA-256 of the input and return it as a Hash.
pub fn double_hash_h(data: &[u8]) -> Hash {
    Hash(sha256d(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_170_SPEND: &str =
        "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16";

    #[test]
    fn test_display_reverses_bytes() {
        let mut raw = [0u8; HASH_SIZE];
        raw[0] = 0x16;
        raw[31] = 0xf4;
        let h = Hash::new(raw);
        let s = h.to_string();
        assert!(s.starts_with("f4"));
        assert!(s.ends_with("16"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let h = Hash::from_hex(BLOCK_170_SPEND).unwrap();
        assert_eq!(h.as_bytes()[0], 0x16);
        assert_eq!(h.to_string(), BLOCK_170_SPEND);
        assert_eq!(BLOCK_170_SPEND.parse::<Hash>().unwrap(), h);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert!(Hash::from_bytes(&[0u8; 31]).is_err());
        assert!(Hash::from_bytes(&[0u8; 33]).is_err());
        assert!(Hash::from_hex("abcd").is_err());
        assert!(Hash::from_hex("zz").is_err());
    }

    #[test]
    fn test_null_hash() {
        assert!(Hash::default().is_null());
        assert!(!double_hash_h(b"").is_null());
    }

    #[test]
    fn test_serde_uses_display_hex() {
        let h = Hash::from_hex(BLOCK_170_SPEND).unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", BLOCK_170_SPEND));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
