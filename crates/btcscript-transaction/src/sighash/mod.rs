//! Signature hash computation.
//!
//! Computes the digest a `checksig` signature must verify against, using the
//! original (pre-segwit) algorithm: prune a copy of the transaction
//! according to the sighash mode, substitute the script code into the input
//! being signed, serialize, append the mode as 4 bytes and double-hash.

use log::error;

use btcscript_primitives::hash::sha256d;
use btcscript_primitives::util::WireWriter;
use btcscript_script::interpreter::{InterpreterError, TxContext};
use btcscript_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

const LOG_TARGET: &str = "btcscript::sighash";

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs. Also the behavior of any selector
/// value not listed here.
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the outputs up to the signed input's index.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Combined with another flag: only sign the current input.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash selector.
pub const SIGHASH_MASK: u32 = 0x1f;

/// The all-zero digest older callers treat as "no signature hash".
///
/// [`signature_hash`] never returns it; failures are reported as errors.
pub const NULL_HASH: [u8; 32] = [0u8; 32];

/// Compute the signature hash for input `input_index`.
///
/// The caller's transaction is not modified; all pruning happens on a copy.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - Script substituted as the signed input's script.
/// * `hash_type` - The sighash mode; only the low byte is meaningful.
///
/// # Returns
/// The 32-byte double-SHA-256 digest, `SighashInputIndex` if the index is
/// out of range (before or after `anyone_can_pay` shrinks the inputs), or
/// `SighashSingleNoOutput` if `single` mode has no output at the index.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    hash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    check_input_index(tx, input_index)?;

    let mut tx_copy = tx.clone();

    match hash_type & SIGHASH_MASK {
        SIGHASH_NONE => {
            tx_copy.outputs.clear();
            zero_other_sequences(&mut tx_copy, input_index);
        }
        SIGHASH_SINGLE => {
            if input_index >= tx_copy.outputs.len() {
                error!(
                    target: LOG_TARGET,
                    "sighash single: input {} has no matching output ({} outputs)",
                    input_index,
                    tx_copy.outputs.len()
                );
                return Err(TransactionError::SighashSingleNoOutput {
                    index: input_index,
                    outputs: tx_copy.outputs.len(),
                });
            }
            tx_copy.outputs.truncate(input_index + 1);
            for output in tx_copy.outputs.iter_mut() {
                output.satoshis = u64::MAX;
                output.locking_script = Script::new();
            }
            zero_other_sequences(&mut tx_copy, input_index);
        }
        _ => {}
    }

    if hash_type & SIGHASH_ANYONECANPAY != 0 {
        let signed = tx_copy.inputs[input_index].clone();
        tx_copy.inputs = vec![signed];
    }

    check_input_index(&tx_copy, input_index)?;

    for input in tx_copy.inputs.iter_mut() {
        input.unlocking_script = Script::new();
    }
    tx_copy.inputs[input_index].unlocking_script = script_code.clone();

    let mut writer = WireWriter::new();
    writer.write_bytes(&tx_copy.to_bytes());
    writer.write_u32_le(hash_type);
    Ok(sha256d(&writer.into_bytes()))
}

fn check_input_index(tx: &Transaction, input_index: usize) -> Result<(), TransactionError> {
    if input_index >= tx.inputs.len() {
        error!(
            target: LOG_TARGET,
            "sighash input index {} out of range ({} inputs)",
            input_index,
            tx.inputs.len()
        );
        return Err(TransactionError::SighashInputIndex {
            index: input_index,
            inputs: tx.inputs.len(),
        });
    }
    Ok(())
}

fn zero_other_sequences(tx: &mut Transaction, input_index: usize) {
    for (i, input) in tx.inputs.iter_mut().enumerate() {
        if i != input_index {
            input.sequence_number = 0;
        }
    }
}

/// A transaction supplies signature hashes for its own inputs.
impl TxContext for Transaction {
    fn signature_hash(
        &self,
        script_code: &Script,
        input_idx: usize,
        hash_type: u32,
    ) -> Result<[u8; 32], InterpreterError> {
        Ok(signature_hash(self, input_idx, script_code, hash_type)?)
    }
}
