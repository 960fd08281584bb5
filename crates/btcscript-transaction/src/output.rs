//! Transaction output with satoshi value and locking script.

use btcscript_primitives::util::{WireReader, WireWriter};
use btcscript_script::Script;

use crate::TransactionError;

/// A single output in a transaction.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | satoshis         | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The number of satoshis locked by this output.
    pub satoshis: u64,

    /// The locking script that defines spending conditions.
    pub locking_script: Script,
}

impl TransactionOutput {
    pub fn new(satoshis: u64, locking_script: Script) -> Self {
        TransactionOutput {
            satoshis,
            locking_script,
        }
    }

    /// Deserialize a `TransactionOutput` from a `WireReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated. A locking script that does not parse is kept as
    /// raw data so the output still serializes back unchanged.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading satoshis: {}", e))
        })?;

        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            satoshis,
            locking_script: Script::parse_or_raw(script_bytes),
        })
    }

    /// Serialize into a `WireWriter`: satoshis, varint script length, script.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.satoshis);
        writer.write_var_bytes(&self.locking_script.to_bytes());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}
