//! Interpreter error types.

use std::fmt;

use crate::ScriptError;

/// Error codes for the script interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterErrorCode {
    /// An internal invariant did not hold.
    Internal,
    /// The caller did not supply what an opcode needs (e.g. no tx context).
    InvalidParams,
    /// The input index is out of range for the transaction being hashed.
    InvalidIndex,
    /// The signature hash could not be formed for this signature.
    SigHashFailed,
    /// A script could not be parsed.
    MalformedPush,
    /// A `raw_data` operation was reached during execution.
    RawDataExecuted,
    /// An opcode without defined behavior was reached.
    UnimplementedOpcode,
    /// An opcode needed more stack items than were present.
    InvalidStackOperation,
    /// `equalverify` compared unequal items.
    EqualVerify,
    /// The stack was empty when the result was read.
    EmptyStack,
    /// The result item was false.
    EvalFalse,
}

impl fmt::Display for InterpreterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A script interpreter error with an error code and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterError {
    pub code: InterpreterErrorCode,
    pub description: String,
}

impl InterpreterError {
    pub fn new(code: InterpreterErrorCode, description: String) -> Self {
        InterpreterError { code, description }
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

impl std::error::Error for InterpreterError {}

impl From<ScriptError> for InterpreterError {
    fn from(e: ScriptError) -> Self {
        InterpreterError::new(InterpreterErrorCode::MalformedPush, e.to_string())
    }
}
