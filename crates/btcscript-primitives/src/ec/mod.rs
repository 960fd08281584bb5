//! Elliptic curve cryptography on secp256k1.
//!
//! Only the verification side is provided: SEC1 public keys and DER-encoded
//! ECDSA signatures checked against a 32-byte prehashed digest.

pub mod public_key;
pub mod signature;

pub use public_key::PublicKey;
pub use signature::Signature;
