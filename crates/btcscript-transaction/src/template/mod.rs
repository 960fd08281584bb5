//! Builders for the standard script shapes.
//!
//! Each template has a `lock` function producing the locking script and an
//! `unlock` function producing the matching unlocking script from an
//! already computed signature. Signing itself is left to the caller.

pub mod p2pk;
pub mod p2pkh;

use btcscript_primitives::ec::Signature;

/// DER signature with the sighash byte appended, as pushed by an unlocking script.
pub fn signature_bytes(signature: &Signature, hash_type: u32) -> Vec<u8> {
    let mut buf = signature.to_der();
    buf.push(hash_type as u8);
    buf
}
