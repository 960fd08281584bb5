//! Stack-machine script interpreter.
//!
//! Executes parsed scripts against a per-run data stack and validates a
//! spend by running the unlocking script and then the locking script over
//! the same stack.
//!
//! # Architecture
//!
//! The interpreter does not depend on the transaction crate. Callers provide
//! a [`TxContext`] implementation that computes the signature hash for
//! `checksig`; the interpreter builds the script code and verifies the
//! signature itself.
//!
//! # Example
//!
//! ```ignore
//! use btcscript_script::interpreter::Engine;
//!
//! let engine = Engine::new();
//! engine.execute(&unlocking_script, &locking_script, Some(&tx), 0)?;
//! ```

pub mod config;
pub mod error;
mod ops_crypto;
mod ops_stack;
pub mod stack;
pub mod thread;

pub use config::{Config, ParseMode};
pub use error::{InterpreterError, InterpreterErrorCode};
pub use ops_crypto::script_code;
pub use stack::{as_bool, Stack};

use log::warn;

use crate::Script;
use thread::Thread;

const LOG_TARGET: &str = "btcscript::interpreter";

/// Transaction context for `checksig`, implemented by the transaction layer.
pub trait TxContext {
    /// Compute the digest a signature over input `input_idx` must verify against.
    ///
    /// `script_code` is the executing script with the signature and any
    /// code separators removed. `hash_type` is the signature's trailing byte.
    ///
    /// An error with code [`InterpreterErrorCode::InvalidIndex`] means the
    /// caller asked about an input the transaction does not have, and aborts
    /// execution. Any other error makes the signature fail to verify.
    fn signature_hash(
        &self,
        script_code: &Script,
        input_idx: usize,
        hash_type: u32,
    ) -> Result<[u8; 32], InterpreterError>;
}

/// The script execution engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    cfg: Config,
}

impl Engine {
    /// Engine with strict parsing.
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn with_config(cfg: Config) -> Self {
        Engine { cfg }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Run a single script from an empty stack.
    ///
    /// # Returns
    /// The final stack, or the error that aborted execution.
    pub fn run(
        &self,
        script: &Script,
        tx_context: Option<&dyn TxContext>,
        input_idx: usize,
    ) -> Result<Stack, InterpreterError> {
        self.run_from(script, Stack::new(), tx_context, input_idx)
    }

    /// Run a single script starting from `stack`.
    pub fn run_from(
        &self,
        script: &Script,
        stack: Stack,
        tx_context: Option<&dyn TxContext>,
        input_idx: usize,
    ) -> Result<Stack, InterpreterError> {
        let mut thread = Thread::new(vec![script], stack, tx_context, input_idx);
        thread.execute()?;
        Ok(thread.into_stack())
    }

    /// Validate a spend: unlocking script, then locking script.
    ///
    /// The unlocking script runs from an empty stack and its final stack
    /// seeds the locking script. The spend is valid when the locking script
    /// completes and leaves a true item on top.
    ///
    /// # Arguments
    /// * `unlocking_script` - The input's unlocking script.
    /// * `locking_script` - The spent output's locking script.
    /// * `tx_context` - Transaction context for `checksig`.
    /// * `input_idx` - The input index being verified.
    ///
    /// # Returns
    /// `Ok(())` if the spend is valid; `EmptyStack` or `EvalFalse` if the
    /// scripts ran but did not authorize it; any other code if execution
    /// aborted.
    pub fn execute(
        &self,
        unlocking_script: &Script,
        locking_script: &Script,
        tx_context: Option<&dyn TxContext>,
        input_idx: usize,
    ) -> Result<(), InterpreterError> {
        let mut thread = Thread::new(
            vec![unlocking_script, locking_script],
            Stack::new(),
            tx_context,
            input_idx,
        );
        thread.execute()?;
        thread.check_error_condition()
    }

    /// Like [`Engine::execute`] but taking binary scripts, parsed according
    /// to the configured [`ParseMode`].
    pub fn execute_bytes(
        &self,
        unlocking_script: &[u8],
        locking_script: &[u8],
        tx_context: Option<&dyn TxContext>,
        input_idx: usize,
    ) -> Result<(), InterpreterError> {
        let unlocking = self.parse(unlocking_script)?;
        let locking = self.parse(locking_script)?;
        self.execute(&unlocking, &locking, tx_context, input_idx)
    }

    /// [`Engine::execute`] collapsed to a boolean.
    pub fn verify(
        &self,
        unlocking_script: &Script,
        locking_script: &Script,
        tx_context: Option<&dyn TxContext>,
        input_idx: usize,
    ) -> bool {
        match self.execute(unlocking_script, locking_script, tx_context, input_idx) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: LOG_TARGET, "input {} failed validation: {}", input_idx, e);
                false
            }
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Script, InterpreterError> {
        match self.cfg.parse_mode {
            ParseMode::Strict => Ok(Script::parse(bytes)?),
            ParseMode::Legacy => Ok(Script::parse_lenient(bytes)),
        }
    }
}
