//! Standard template classification.
//!
//! Templates are matched on opcode shape only. The script-hash and multisig
//! checks never match; callers relying on classification see those scripts
//! as non-standard.

use std::fmt;

use crate::opcodes::Opcode;
use crate::operation::Operation;

/// The standard spend pattern a locking script matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentType {
    PubKey,
    PubKeyHash,
    ScriptHash,
    Multisig,
    NonStandard,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentType::PubKey => "pubkey",
            PaymentType::PubKeyHash => "pubkey_hash",
            PaymentType::ScriptHash => "script_hash",
            PaymentType::Multisig => "multisig",
            PaymentType::NonStandard => "non_standard",
        })
    }
}

fn matches_shape(ops: &[Operation], shape: &[Opcode]) -> bool {
    ops.len() == shape.len() && ops.iter().zip(shape).all(|(op, code)| op.opcode() == *code)
}

/// `<pubkey> checksig`.
pub fn is_pubkey_type(ops: &[Operation]) -> bool {
    matches_shape(ops, &[Opcode::Special, Opcode::CheckSig])
}

/// `dup hash160 <hash> equalverify checksig`.
pub fn is_pubkey_hash_type(ops: &[Operation]) -> bool {
    matches_shape(
        ops,
        &[
            Opcode::Dup,
            Opcode::Hash160,
            Opcode::Special,
            Opcode::EqualVerify,
            Opcode::CheckSig,
        ],
    )
}

/// Never matches.
pub fn is_script_hash_type(_ops: &[Operation]) -> bool {
    false
}

/// Never matches.
pub fn is_multisig_type(_ops: &[Operation]) -> bool {
    false
}

/// Classify an operation sequence; the first matching template wins.
pub fn classify(ops: &[Operation]) -> PaymentType {
    if is_pubkey_type(ops) {
        PaymentType::PubKey
    } else if is_pubkey_hash_type(ops) {
        PaymentType::PubKeyHash
    } else if is_script_hash_type(ops) {
        PaymentType::ScriptHash
    } else if is_multisig_type(ops) {
        PaymentType::Multisig
    } else {
        PaymentType::NonStandard
    }
}
