//! Hashing and signature operations.

use log::{debug, warn};

use btcscript_primitives::ec::{PublicKey, Signature};
use btcscript_primitives::hash::{hash160, sha256};

use crate::opcodes::OP_CODESEPARATOR;
use crate::operation::Operation;
use crate::Script;

use super::error::{InterpreterError, InterpreterErrorCode};
use super::thread::Thread;

const LOG_TARGET: &str = "btcscript::interpreter::checksig";

/// Digest computed by the `sha256` and `hash160` opcodes.
pub(crate) enum DigestKind {
    Sha256,
    Hash160,
}

/// Build the script code a signature commits to.
///
/// Returns a copy of `script` without any operation whose data equals
/// `signature` and without any `codeseparator` operation. `script` itself is
/// left untouched.
///
/// # Arguments
/// * `script` - The script currently executing.
/// * `signature` - The DER signature with its sighash byte already removed.
pub fn script_code(script: &Script, signature: &[u8]) -> Script {
    script
        .operations()
        .iter()
        .filter(|op| !is_separator(op) && op.data() != signature)
        .cloned()
        .collect()
}

fn is_separator(op: &Operation) -> bool {
    op.opcode().to_byte() == Some(OP_CODESEPARATOR)
}

impl<'a> Thread<'a> {
    pub(crate) fn op_hash(&mut self, kind: DigestKind) -> Result<(), InterpreterError> {
        let name = match kind {
            DigestKind::Sha256 => "sha256",
            DigestKind::Hash160 => "hash160",
        };
        self.dstack.require(1, name)?;
        let buf = self.dstack.pop_byte_array()?;
        let digest = match kind {
            DigestKind::Sha256 => sha256(&buf).to_vec(),
            DigestKind::Hash160 => hash160(&buf).to_vec(),
        };
        self.dstack.push_byte_array(digest);
        Ok(())
    }

    /// Pops the public key, then the signature, and pushes the verification
    /// result as a stack marker. Only a stack underflow, a missing
    /// transaction context or an out-of-range input index abort execution.
    pub(crate) fn op_checksig(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(2, "checksig")?;
        let pk_bytes = self.dstack.pop_byte_array()?;
        let full_sig = self.dstack.pop_byte_array()?;

        let valid = self.check_signature(&pk_bytes, full_sig)?;
        self.dstack.push_bool(valid);
        Ok(())
    }

    fn check_signature(&self, pk_bytes: &[u8], mut sig: Vec<u8>) -> Result<bool, InterpreterError> {
        let ctx = self.tx_context.ok_or_else(|| {
            InterpreterError::new(
                InterpreterErrorCode::InvalidParams,
                "no tx context for checksig".to_string(),
            )
        })?;

        let hash_type = match sig.pop() {
            Some(b) => b as u32,
            None => {
                debug!(target: LOG_TARGET, "empty signature");
                return Ok(false);
            }
        };

        let code = script_code(self.current_script(), &sig);
        let digest = match ctx.signature_hash(&code, self.input_idx, hash_type) {
            Ok(digest) => digest,
            Err(e) if e.code == InterpreterErrorCode::InvalidIndex => return Err(e),
            Err(e) => {
                warn!(target: LOG_TARGET, "signature hash unavailable: {}", e);
                return Ok(false);
            }
        };

        let pub_key = match PublicKey::from_bytes(pk_bytes) {
            Ok(key) => key,
            Err(e) => {
                debug!(target: LOG_TARGET, "bad public key: {}", e);
                return Ok(false);
            }
        };
        let signature = match Signature::from_der(&sig) {
            Ok(signature) => signature,
            Err(e) => {
                debug!(target: LOG_TARGET, "bad signature encoding: {}", e);
                return Ok(false);
            }
        };

        Ok(pub_key.verify(&digest, &signature))
    }
}
