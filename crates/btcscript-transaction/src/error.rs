use btcscript_primitives::PrimitivesError;
use btcscript_script::interpreter::{InterpreterError, InterpreterErrorCode};
use btcscript_script::ScriptError;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The signature hash was requested for an input the transaction does
    /// not have. This is a caller bug, not an invalid signature.
    #[error("sighash input index {index} out of range (tx has {inputs} inputs)")]
    SighashInputIndex { index: usize, inputs: usize },
    /// `single` mode was requested for an input with no output at its index.
    #[error("sighash single: no output for input {index} (tx has {outputs} outputs)")]
    SighashSingleNoOutput { index: usize, outputs: usize },
    /// An input index passed to verification is out of range.
    #[error("input index {index} out of range (tx has {inputs} inputs)")]
    InputIndex { index: usize, inputs: usize },
    /// Binary/hex deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// The scripts ran but did not authorize the spend, or execution aborted.
    #[error("script validation failed: {0}")]
    Validation(#[from] InterpreterError),
    /// An underlying script error (forwarded from `btcscript-script`).
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
    /// An underlying primitives error (forwarded from `btcscript-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl From<TransactionError> for InterpreterError {
    fn from(e: TransactionError) -> Self {
        let code = match e {
            TransactionError::SighashInputIndex { .. } => InterpreterErrorCode::InvalidIndex,
            _ => InterpreterErrorCode::SigHashFailed,
        };
        InterpreterError::new(code, e.to_string())
    }
}
