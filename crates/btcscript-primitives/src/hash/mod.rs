//! Hash function primitives.
//!
//! The script engine needs three digests: SHA-256 for `sha256`, the
//! RIPEMD-160-over-SHA-256 "short hash" for `hash160`, and double SHA-256
//! for transaction digests and identifiers.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length in bytes of a SHA-256 digest.
pub const SHA256_LENGTH: usize = 32;

/// Length in bytes of a RIPEMD-160 / Hash160 digest.
pub const SHORT_HASH_LENGTH: usize = 20;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; SHA256_LENGTH] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 (SHA-256d) hash of the input data.
///
/// This is the digest used for signature hashes and transaction IDs.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256(SHA-256(data)) digest.
pub fn sha256d(data: &[u8]) -> [u8; SHA256_LENGTH] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; SHORT_HASH_LENGTH] {
    Ripemd160::digest(data).into()
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// This is the short hash committed to by pay-to-pubkey-hash scripts.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte digest.
pub fn hash160(data: &[u8]) -> [u8; SHORT_HASH_LENGTH] {
    ripemd160(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_abc() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256d_is_sha256_twice() {
        let data = b"script engine";
        assert_eq!(sha256d(data), sha256(&sha256(data)));
    }

    #[test]
    fn test_ripemd160_empty() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_hash160_of_block_170_key() {
        let pubkey = hex::decode(
            "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5\
             cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
        )
        .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "11b366edfc0a8b66feebae5c2e25a7b6a5d1cf31"
        );
    }
}
