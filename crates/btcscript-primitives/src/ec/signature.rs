//! ECDSA signature as carried in script.
//!
//! Script signatures are DER-encoded (R, S) pairs. Decoding is tolerant of
//! redundant zero padding, and verification accepts either half of the S
//! range since historical signatures predate low-S enforcement.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa;

use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2).
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// An ECDSA signature with R and S components (32 bytes each, big-endian).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S values.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// The R component.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The S component.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`.
    /// Trailing bytes past the declared sequence length are ignored.
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes without the sighash byte.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the encoding is malformed
    /// or either integer is zero or not below the curve order.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 {
            return Err(malformed("too short"));
        }
        if bytes[0] != 0x30 {
            return Err(malformed("no sequence header"));
        }

        let seq_len = bytes[1] as usize;
        if seq_len + 2 > bytes.len() || seq_len + 2 < 8 {
            return Err(malformed("bad sequence length"));
        }
        let data = &bytes[..seq_len + 2];

        let (r_bytes, rest) = read_der_int(&data[2..], "R")?;
        let (s_bytes, _) = read_der_int(rest, "S")?;

        let r = to_32_bytes(r_bytes)?;
        let s = to_32_bytes(s_bytes)?;

        if is_zero(&r) {
            return Err(malformed("R is zero"));
        }
        if is_zero(&s) {
            return Err(malformed("S is zero"));
        }
        if !is_less_than(&r, &CURVE_ORDER) {
            return Err(malformed("R is not below the curve order"));
        }
        if !is_less_than(&s, &CURVE_ORDER) {
            return Err(malformed("S is not below the curve order"));
        }

        Ok(Signature { r, s })
    }

    /// Serialize in canonical DER with minimal integer encodings.
    ///
    /// S is written as stored; see [`Signature::to_low_s`] for normalization.
    pub fn to_der(&self) -> Vec<u8> {
        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&self.s);

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(0x30);
        out.push((total_len - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Whether S lies in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        !is_greater_than(&self.s, &HALF_ORDER)
    }

    /// Return the equivalent signature with S in the lower half (N - S when high).
    pub fn to_low_s(&self) -> Signature {
        if self.is_low_s() {
            self.clone()
        } else {
            Signature {
                r: self.r,
                s: subtract_from_order(&self.s),
            }
        }
    }

    /// Verify this signature against a digest and public key.
    ///
    /// The digest is used as a prehash directly, without further hashing.
    /// High-S signatures are checked through their low-S twin, which
    /// is valid for exactly the same (digest, key) pairs.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte digest that was signed.
    /// * `pub_key` - The public key to verify against.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, hash: &[u8], pub_key: &PublicKey) -> bool {
        let normalized = self.to_low_s();
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(normalized.r),
            k256::FieldBytes::from(normalized.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        pub_key
            .verifying_key()
            .verify_prehash(&normalize_hash(hash), &k256_sig)
            .is_ok()
    }
}

fn malformed(reason: &str) -> PrimitivesError {
    PrimitivesError::InvalidSignature(format!("malformed signature: {}", reason))
}

/// Read one `0x02 <len> <bytes>` integer, returning it and the remainder.
fn read_der_int<'a>(data: &'a [u8], name: &str) -> Result<(&'a [u8], &'a [u8]), PrimitivesError> {
    if data.len() < 2 || data[0] != 0x02 {
        return Err(malformed(&format!("no {} integer marker", name)));
    }
    let len = data[1] as usize;
    if len == 0 || 2 + len > data.len() {
        return Err(malformed(&format!("bogus {} length", name)));
    }
    Ok((&data[2..2 + len], &data[2 + len..]))
}

/// Left-pad or truncate a digest to 32 bytes.
fn normalize_hash(hash: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if hash.len() >= 32 {
        padded.copy_from_slice(&hash[..32]);
    } else {
        padded[32 - hash.len()..].copy_from_slice(hash);
    }
    padded
}

/// Minimal DER integer body: leading zeros stripped, sign byte added if needed.
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let start = val.iter().position(|&b| b != 0).unwrap_or(31);
    let trimmed = &val[start..];
    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Convert a variable-length big-endian integer to a fixed 32-byte array.
fn to_32_bytes(bytes: &[u8]) -> Result<[u8; 32], PrimitivesError> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let trimmed = &bytes[start..];
    if trimmed.len() > 32 {
        return Err(malformed("integer value too large for 32 bytes"));
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Big-endian a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

/// Big-endian a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute N - val where N is the secp256k1 curve order.
fn subtract_from_order(val: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i32 - val[i] as i32 - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // Spend of the block 9 coinbase in block 170.
    const SIG_170: &str = "304402204e45e16932b8af514961a1d3a1a25fdf3f4f7732e9d624c6c61548ab5f\
                           b8cd410220181522ec8eca07de4860a4acdd12909d831cc56cbbac4622082221a8\
                           768d1d09";
    const KEY_9: &str = "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5\
                         cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3";
    const DIGEST_170: &str = "7a05c6145f10101e9d6325494245adf1297d80f8f38d4d576d57cdba220bcb19";

    fn fixture() -> (Signature, PublicKey, Vec<u8>) {
        let sig = Signature::from_der(&hex::decode(SIG_170).unwrap()).unwrap();
        let key = PublicKey::from_hex(KEY_9).unwrap();
        let digest = hex::decode(DIGEST_170).unwrap();
        (sig, key, digest)
    }

    #[test]
    fn test_der_roundtrip() {
        let der = hex::decode(SIG_170).unwrap();
        let sig = Signature::from_der(&der).unwrap();
        assert_eq!(sig.to_der(), der);
        assert!(sig.is_low_s());
    }

    #[test]
    fn test_der_rejects_malformed() {
        let der = hex::decode(SIG_170).unwrap();
        assert!(Signature::from_der(&[]).is_err());

        let mut bad_magic = der.clone();
        bad_magic[0] = 0x31;
        assert!(Signature::from_der(&bad_magic).is_err());

        let mut bad_r_marker = der.clone();
        bad_r_marker[2] = 0x03;
        assert!(Signature::from_der(&bad_r_marker).is_err());

        let mut bad_len = der.clone();
        bad_len[1] = 0x50;
        assert!(Signature::from_der(&bad_len).is_err());

        assert!(Signature::from_der(&der[..der.len() - 5]).is_err());
    }

    #[test]
    fn test_der_rejects_zero_and_order() {
        // r = 0
        let zero_r = hex::decode("3006020100020101").unwrap();
        assert!(Signature::from_der(&zero_r).is_err());

        let mut der = vec![0x30, 0x26, 0x02, 0x21, 0x00];
        der.extend_from_slice(&CURVE_ORDER);
        der.extend_from_slice(&[0x02, 0x01, 0x01]);
        assert!(Signature::from_der(&der).is_err());
    }

    #[test]
    fn test_verify_known_spend() {
        let (sig, key, digest) = fixture();
        assert!(sig.verify(&digest, &key));
        assert!(key.verify(&digest, &sig));
    }

    #[test]
    fn test_verify_rejects_other_digest() {
        let (sig, key, mut digest) = fixture();
        digest[0] ^= 0x01;
        assert!(!sig.verify(&digest, &key));
    }

    #[test]
    fn test_high_s_twin_verifies() {
        let (sig, key, digest) = fixture();
        let high = Signature::new(*sig.r(), subtract_from_order(sig.s()));
        assert!(!high.is_low_s());
        assert_eq!(high.to_low_s(), sig);
        assert!(high.verify(&digest, &key));
    }

    #[test]
    fn test_padded_integers_accepted() {
        let (sig, _, _) = fixture();
        // R with a redundant leading zero byte
        let mut der = vec![0x30, 0x45, 0x02, 0x21, 0x00];
        der.extend_from_slice(sig.r());
        der.extend_from_slice(&[0x02, 0x20]);
        der.extend_from_slice(sig.s());
        assert_eq!(Signature::from_der(&der).unwrap(), sig);
    }
}
