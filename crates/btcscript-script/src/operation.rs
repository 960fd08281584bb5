//! A single decoded instruction.

use crate::opcodes::Opcode;
use crate::operand::{encode_push_header, max_push_length, smallest_push};
use crate::ScriptError;

/// One decoded instruction: an opcode plus its data.
///
/// Data is non-empty only for the push forms and for `RawData`. The
/// constructors enforce that a push payload fits its length field, so every
/// `Operation` can be serialized.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    opcode: Opcode,
    data: Vec<u8>,
}

impl Operation {
    /// Create an operation, validating the data against the opcode.
    ///
    /// # Arguments
    /// * `opcode` - The instruction tag.
    /// * `data` - Payload for push forms or `RawData`; must be empty otherwise.
    ///
    /// # Returns
    /// `Ok(Operation)`, or an error if the payload does not fit the opcode.
    pub fn new(opcode: Opcode, data: Vec<u8>) -> Result<Self, ScriptError> {
        match max_push_length(opcode) {
            Some(max) if data.len() > max => {
                return Err(ScriptError::DataTooBig {
                    opcode,
                    len: data.len(),
                })
            }
            None if opcode != Opcode::RawData && !data.is_empty() => {
                return Err(ScriptError::UnexpectedData(opcode))
            }
            _ => {}
        }
        Ok(Operation { opcode, data })
    }

    /// A zero-data operation.
    pub fn from_opcode(opcode: Opcode) -> Self {
        Operation {
            opcode,
            data: Vec::new(),
        }
    }

    /// Push `data` using the smallest push form that can carry it.
    pub fn push(data: &[u8]) -> Result<Self, ScriptError> {
        Operation::new(smallest_push(data.len())?, data.to_vec())
    }

    /// Wrap an opaque payload (a coinbase input script) as `RawData`.
    pub fn raw_data(bytes: &[u8]) -> Self {
        Operation {
            opcode: Opcode::RawData,
            data: bytes.to_vec(),
        }
    }

    /// The instruction tag.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The pushed (or raw) payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether this is a push operation.
    pub fn is_push(&self) -> bool {
        self.opcode.is_push()
    }

    /// Append the wire form of this operation to `out`.
    ///
    /// Push forms write their header then the payload; `RawData` writes the
    /// payload verbatim; every other opcode writes its byte value.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self.opcode {
            Opcode::RawData => {}
            op => match encode_push_header(op, self.data.len()) {
                Some(header) => out.extend_from_slice(&header),
                None => out.extend(op.to_byte()),
            },
        }
        out.extend_from_slice(&self.data);
    }
}
