//! btcscript transaction: wire format, signature hashing and input verification.
//!
//! Provides the Transaction type with inputs and outputs, binary/hex
//! serialization, transaction ids, the legacy signature-hash algorithm, and
//! the `TxContext` glue that lets the script interpreter verify `checksig`
//! against a transaction.

pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod transaction;

mod error;
pub use error::TransactionError;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use transaction::Transaction;
