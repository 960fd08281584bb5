//! Pay-to-Public-Key-Hash script template.
//!
//! Locking script `dup hash160 <hash> equalverify checksig`, unlocking
//! script `<sig> <pubkey>`.

use btcscript_primitives::ec::{PublicKey, Signature};
use btcscript_script::{Opcode, Operation, Script};

use crate::template::signature_bytes;
use crate::TransactionError;

/// Create a P2PKH locking script for a 20-byte public key hash.
pub fn lock(pub_key_hash: &[u8; 20]) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.push_operation(Operation::from_opcode(Opcode::Dup));
    script.push_operation(Operation::from_opcode(Opcode::Hash160));
    script.push_data(pub_key_hash)?;
    script.push_operation(Operation::from_opcode(Opcode::EqualVerify));
    script.push_operation(Operation::from_opcode(Opcode::CheckSig));
    Ok(script)
}

/// Create a P2PKH unlocking script: the signature with its sighash byte,
/// then the public key in the encoding whose hash the output commits to.
pub fn unlock(
    signature: &Signature,
    hash_type: u32,
    pub_key: &PublicKey,
) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.push_data(&signature_bytes(signature, hash_type))?;
    script.push_data(&pub_key.to_bytes())?;
    Ok(script)
}
