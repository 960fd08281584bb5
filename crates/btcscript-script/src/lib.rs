//! btcscript script: parsing, serialization, classification and execution.
//!
//! Provides the opcode set, the operand codec for push headers, the
//! [`Script`] operation sequence with its binary and textual forms, the
//! standard template classifier, and the stack-machine interpreter.

pub mod classify;
pub mod interpreter;
pub mod opcodes;
pub mod operand;
pub mod operation;
pub mod script;

mod error;
pub use classify::PaymentType;
pub use error::ScriptError;
pub use opcodes::Opcode;
pub use operation::Operation;
pub use script::Script;
