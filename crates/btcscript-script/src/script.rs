//! Script type: an ordered sequence of operations.
//!
//! Provides parsing from and serialization to the binary script format,
//! the textual `pretty` form, concatenation and template classification.

use std::fmt;

use log::{debug, warn};

use crate::classify::{classify, PaymentType};
use crate::opcodes::Opcode;
use crate::operand::{decode_push_length, length_field_width};
use crate::operation::Operation;
use crate::ScriptError;

const LOG_TARGET: &str = "btcscript::script";

/// A script: the program attached to a transaction input or output.
///
/// Operation order is execution order. A script is never modified by
/// execution, so one instance may be shared by concurrent validations.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Script {
    operations: Vec<Operation>,
}

impl Script {
    /// Create an empty script.
    pub fn new() -> Self {
        Script::default()
    }

    /// Wrap a coinbase input payload as a single `raw_data` operation.
    ///
    /// The payload is kept opaque and serializes back verbatim.
    pub fn coinbase(raw: &[u8]) -> Self {
        Script {
            operations: vec![Operation::raw_data(raw)],
        }
    }

    /// Parse binary script bytes.
    ///
    /// Bytes 0 to 75 start a direct push of that many bytes, the pushdata
    /// opcodes read an explicit length, and every other byte is a zero-data
    /// operation.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes.
    ///
    /// # Returns
    /// The parsed script, or `ScriptError::PrematureEnd` if a push runs past
    /// the end of the input.
    pub fn parse(bytes: &[u8]) -> Result<Self, ScriptError> {
        let mut operations = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let raw_byte = bytes[pos];
            pos += 1;

            let (length, header) = decode_push_length(raw_byte, &bytes[pos..]).map_err(|_| {
                ScriptError::PrematureEnd {
                    offset: pos - 1,
                    needed: length_field_width(Opcode::from_byte(raw_byte)),
                    available: bytes.len() - pos,
                }
            })?;
            pos += header;

            let available = bytes.len() - pos;
            if length > available {
                return Err(ScriptError::PrematureEnd {
                    offset: pos,
                    needed: length,
                    available,
                });
            }

            let data = bytes[pos..pos + length].to_vec();
            pos += length;
            operations.push(Operation::new(Opcode::from_byte(raw_byte), data)?);
        }

        Ok(Script { operations })
    }

    /// Parse with the legacy failure convention.
    ///
    /// A malformed script is logged and yields an empty script, which a
    /// caller cannot tell apart from a genuinely empty one. Prefer
    /// [`Script::parse`] unless bit-exact legacy behavior is required.
    pub fn parse_lenient(bytes: &[u8]) -> Self {
        match Script::parse(bytes) {
            Ok(script) => script,
            Err(e) => {
                warn!(target: LOG_TARGET, "Premature end of script. ({})", e);
                Script::new()
            }
        }
    }

    /// Parse wire bytes without losing any of them.
    ///
    /// A script that does not parse is kept as one `raw_data` operation: it
    /// serializes back verbatim and fails with `RawDataExecuted` if run.
    pub fn parse_or_raw(bytes: &[u8]) -> Self {
        match Script::parse(bytes) {
            Ok(script) => script,
            Err(e) => {
                debug!(target: LOG_TARGET, "keeping malformed script as raw data ({})", e);
                Script::coinbase(bytes)
            }
        }
    }

    /// Parse a hex-encoded script.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Script::parse(&hex::decode(hex_str)?)
    }

    /// Parse the textual form produced by [`Script::pretty`].
    ///
    /// Opcode names map back through [`Opcode::from_name`]; `[ hex ]` becomes
    /// a push in the smallest form that carries the data.
    pub fn from_pretty(text: &str) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        let mut tokens = text.split_whitespace();

        while let Some(token) = tokens.next() {
            if token == "[" {
                let mut data = Vec::new();
                loop {
                    match tokens.next() {
                        Some("]") => break,
                        Some(hex_part) => data.extend(hex::decode(hex_part)?),
                        None => {
                            return Err(ScriptError::InvalidText(
                                "unterminated push".to_string(),
                            ))
                        }
                    }
                }
                script.push_operation(Operation::push(&data)?);
            } else {
                let opcode: Opcode = token.parse()?;
                script.push_operation(Operation::from_opcode(opcode));
            }
        }

        Ok(script)
    }

    /// Serialize to binary script bytes.
    ///
    /// Inverse of [`Script::parse`] for every script the parser produced. A
    /// lone `raw_data` operation serializes to its payload unchanged.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.operations {
            op.write_to(&mut out);
        }
        out
    }

    /// Serialize to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Render as text: names for plain opcodes, `[ hex ]` for data.
    ///
    /// An operation is rendered by its data whenever it has any, so an empty
    /// direct push prints as `special`.
    pub fn pretty(&self) -> String {
        self.operations
            .iter()
            .map(|op| {
                if op.data().is_empty() {
                    op.opcode().name().into_owned()
                } else {
                    format!("[ {} ]", hex::encode(op.data()))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Append one operation.
    pub fn push_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Append a push of `data` in its smallest form.
    pub fn push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        self.push_operation(Operation::push(data)?);
        Ok(())
    }

    /// Append copies of all of `other`'s operations.
    pub fn join(&mut self, other: &Script) {
        self.operations.extend_from_slice(&other.operations);
    }

    /// The operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the script has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Classify against the standard templates.
    pub fn payment_type(&self) -> PaymentType {
        classify(&self.operations)
    }
}

impl FromIterator<Operation> for Script {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Script {
            operations: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.pretty())
    }
}

/// Serialize as the hex string of the binary form.
impl serde::Serialize for Script {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
