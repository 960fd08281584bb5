//! Core transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! locktime. Supports binary and hex serialization, transaction ID
//! computation, and script verification of individual inputs.

use log::debug;

use btcscript_primitives::chainhash::{double_hash_h, Hash};
use btcscript_primitives::util::{VarInt, WireReader, WireWriter};
use btcscript_script::interpreter::{Engine, TxContext};
use btcscript_script::Script;

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::TransactionError;

const LOG_TARGET: &str = "btcscript::transaction";

/// A transaction consisting of a version, a set of inputs, a set of
/// outputs, and a lock time.
///
/// # Wire format
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE)              |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE)              |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of the raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the hex is
    /// invalid or the bytes do not form a valid transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must contain exactly one complete transaction with no
    /// trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = WireReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let version = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;

        let input_count = read_count(reader, "input count")?;
        // every input occupies at least 41 bytes
        let mut inputs = Vec::with_capacity(input_count.min(reader.remaining() / 41));
        for _ in 0..input_count {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = read_count(reader, "output count")?;
        let mut outputs = Vec::with_capacity(output_count.min(reader.remaining() / 9));
        for _ in 0..output_count {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw bytes.
    ///
    /// # Returns
    /// version(4) + varint(n_in) + inputs + varint(n_out) + outputs + locktime(4).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction ID (double SHA-256 of the serialized bytes).
    ///
    /// The hash holds the internal byte order; its `Display` form is the
    /// conventional reversed hex.
    pub fn tx_id(&self) -> Hash {
        double_hash_h(&self.to_bytes())
    }

    /// The transaction ID in display (byte-reversed) hex.
    pub fn tx_id_hex(&self) -> String {
        self.tx_id().to_string()
    }

    // -----------------------------------------------------------------
    // Inputs and outputs
    // -----------------------------------------------------------------

    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// A coinbase transaction has exactly one input, spending the null
    /// previous output.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }

    // -----------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------

    /// Verify input `index` against the locking script of the output it spends.
    ///
    /// Runs the input's unlocking script and then `locking_script` over one
    /// stack, with this transaction supplying signature hashes to `checksig`.
    ///
    /// # Arguments
    /// * `index` - The input to verify.
    /// * `locking_script` - The locking script of the previous output.
    ///
    /// # Returns
    /// `Ok(())` if the spend is authorized, otherwise the reason it is not.
    pub fn verify_input(&self, index: usize, locking_script: &Script) -> Result<(), TransactionError> {
        self.verify_input_with(&Engine::new(), index, locking_script)
    }

    /// Like [`Transaction::verify_input`] with a caller-configured engine.
    pub fn verify_input_with(
        &self,
        engine: &Engine,
        index: usize,
        locking_script: &Script,
    ) -> Result<(), TransactionError> {
        let input = self.inputs.get(index).ok_or(TransactionError::InputIndex {
            index,
            inputs: self.inputs.len(),
        })?;

        debug!(target: LOG_TARGET, "verifying input {} of {}", index, self.tx_id());
        let ctx: &dyn TxContext = self;
        engine.execute(&input.unlocking_script, locking_script, Some(ctx), index)?;
        Ok(())
    }
}

fn read_count(reader: &mut WireReader, what: &str) -> Result<usize, TransactionError> {
    let count = reader.read_varint().map_err(|e| {
        TransactionError::SerializationError(format!("reading {}: {}", what, e))
    })?;
    usize::try_from(count.value())
        .map_err(|_| TransactionError::SerializationError(format!("{} too large", what)))
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
