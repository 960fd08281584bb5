use crate::opcodes::Opcode;

/// Error types for script parsing and construction.
///
/// Execution failures are reported separately by
/// [`InterpreterError`](crate::interpreter::InterpreterError).
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A push declared more bytes than the script contains.
    #[error("premature end of script at offset {offset}: needed {needed} bytes, {available} available")]
    PrematureEnd {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Push payload does not fit the length field of the chosen opcode.
    #[error("{len} bytes of data do not fit a {opcode} push")]
    DataTooBig { opcode: Opcode, len: usize },

    /// A non-push opcode was given a data payload.
    #[error("opcode {0} cannot carry data")]
    UnexpectedData(Opcode),

    /// Textual opcode name not in the opcode table.
    #[error("unknown opcode name '{0}'")]
    UnknownOpcodeName(String),

    /// Malformed textual script.
    #[error("invalid script text: {0}")]
    InvalidText(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
