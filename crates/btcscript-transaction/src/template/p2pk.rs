//! Pay-to-Public-Key script template.
//!
//! Locking script `<pubkey> checksig`, unlocking script `<sig>`.

use btcscript_primitives::ec::{PublicKey, Signature};
use btcscript_script::{Opcode, Operation, Script};

use crate::template::signature_bytes;
use crate::TransactionError;

/// Create a P2PK locking script for `pub_key`, in the encoding it was parsed from.
pub fn lock(pub_key: &PublicKey) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.push_data(&pub_key.to_bytes())?;
    script.push_operation(Operation::from_opcode(Opcode::CheckSig));
    Ok(script)
}

/// Create a P2PK unlocking script pushing `signature` with its sighash byte.
pub fn unlock(signature: &Signature, hash_type: u32) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.push_data(&signature_bytes(signature, hash_type))?;
    Ok(script)
}
