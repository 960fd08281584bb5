//! secp256k1 public key.
//!
//! Accepts compressed (33-byte) and uncompressed (65-byte) SEC1 encodings as
//! they appear pushed onto the script stack.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + x + y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key used to verify script signatures.
///
/// Wraps a k256 `VerifyingKey` and remembers whether it was supplied in
/// compressed form so it can be re-serialized the way it arrived.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
    compressed: bool,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes are not a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key is empty".to_string(),
            ));
        }
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey {
            inner,
            compressed: bytes.len() == COMPRESSED_LEN,
        })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in the encoding the key was created from.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.to_compressed().to_vec()
        } else {
            self.to_uncompressed().to_vec()
        }
    }

    /// Compute Hash160 of the key in its original encoding.
    ///
    /// This is the value a pay-to-pubkey-hash script commits to.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }

    /// Verify an ECDSA signature against a 32-byte digest.
    ///
    /// # Arguments
    /// * `hash` - The digest that was signed.
    /// * `sig` - The signature to check.
    ///
    /// # Returns
    /// `true` if the signature is valid for this digest and key.
    pub fn verify(&self, hash: &[u8], sig: &Signature) -> bool {
        sig.verify(hash, self)
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}
