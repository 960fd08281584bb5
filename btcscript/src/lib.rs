#![deny(missing_docs)]

//! btcscript: a Bitcoin script engine.
//!
//! Re-exports the primitives, script and transaction crates for
//! single-crate usage, plus the types most callers start from.

pub use btcscript_primitives as primitives;
pub use btcscript_script as script;
pub use btcscript_transaction as transaction;

pub use btcscript_script::interpreter::{Config, Engine, InterpreterError, ParseMode};
pub use btcscript_script::{Opcode, Operation, PaymentType, Script};
pub use btcscript_transaction::{Transaction, TransactionError};
