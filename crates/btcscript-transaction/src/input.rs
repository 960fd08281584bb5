//! Transaction input referencing a previous output.
//!
//! Contains the source transaction ID, output index, unlocking script and
//! sequence number, with binary serialization following the wire format.

use btcscript_primitives::util::{WireReader, WireWriter};
use btcscript_script::Script;

use crate::TransactionError;

/// Default sequence number indicating a finalized input.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// Output index used by the null previous output of a coinbase input.
pub const COINBASE_OUT_INDEX: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// Each input references an output from a previous transaction by its
/// transaction ID (`source_txid`) and output index (`source_tx_out_index`).
/// The `unlocking_script` supplies the data required to satisfy the
/// referenced output's locking script.
///
/// # Wire format
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | source_txid        | 32 bytes (LE)    |
/// | source_tx_out_index| 4 bytes (LE)     |
/// | script length      | VarInt           |
/// | unlocking_script   | variable         |
/// | sequence_number    | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The 32-byte transaction ID of the output being spent, in internal
    /// (little-endian) byte order.
    pub source_txid: [u8; 32],

    /// Index of the output within the source transaction.
    pub source_tx_out_index: u32,

    /// The unlocking script. For a coinbase input this is a single
    /// `raw_data` operation holding the opaque payload.
    pub unlocking_script: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_number: u32,
}

impl TransactionInput {
    /// Create an input spending `source_tx_out_index` of `source_txid`, with
    /// an empty unlocking script and a finalized sequence.
    pub fn new(source_txid: [u8; 32], source_tx_out_index: u32) -> Self {
        TransactionInput {
            source_txid,
            source_tx_out_index,
            unlocking_script: Script::new(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
        }
    }

    /// Whether this input spends the null previous output, i.e. an all-zero
    /// txid with output index `0xFFFFFFFF`.
    pub fn is_coinbase(&self) -> bool {
        self.source_txid == [0u8; 32] && self.source_tx_out_index == COINBASE_OUT_INDEX
    }

    /// Deserialize a `TransactionInput` from a `WireReader`.
    ///
    /// The unlocking script of a coinbase input is not parsed; it is kept as
    /// one `raw_data` operation so it serializes back unchanged. Any other
    /// unlocking script is parsed, falling back to the same raw form when
    /// it is malformed.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let source_txid = reader.read_array::<32>().map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;

        let source_tx_out_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        let mut input = TransactionInput::new(source_txid, source_tx_out_index);
        input.sequence_number = sequence_number;
        input.unlocking_script = if input.is_coinbase() {
            Script::coinbase(script_bytes)
        } else {
            Script::parse_or_raw(script_bytes)
        };
        Ok(input)
    }

    /// Serialize into a `WireWriter`: txid, output index, varint script
    /// length, script bytes and sequence number.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_bytes(&self.source_txid);
        writer.write_u32_le(self.source_tx_out_index);
        writer.write_var_bytes(&self.unlocking_script.to_bytes());
        writer.write_u32_le(self.sequence_number);
    }
}
