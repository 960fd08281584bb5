//! btcscript primitives: hashing, secp256k1 verification and wire encoding.
//!
//! This crate provides the leaf building blocks the script engine consumes:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Chain hash type for displaying transaction identifiers
//! - secp256k1 public keys and DER signature verification
//! - Variable-length integers and a little-endian wire reader/writer

pub mod chainhash;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;
