//! Script execution thread.
//!
//! A thread runs one or more scripts in sequence over a single data stack.
//! Two-phase validation is the unlocking script followed by the locking
//! script, with the stack handed from one to the next.

use log::{debug, error};

use crate::opcodes::Opcode;
use crate::operation::Operation;
use crate::Script;

use super::error::{InterpreterError, InterpreterErrorCode};
use super::ops_crypto::DigestKind;
use super::stack::*;
use super::TxContext;

const LOG_TARGET: &str = "btcscript::interpreter";

/// The execution thread for the script interpreter.
pub struct Thread<'a> {
    /// The data stack, private to this execution.
    pub dstack: Stack,
    /// Scripts to run, in order.
    pub scripts: Vec<&'a Script>,
    /// Index of the currently executing script.
    pub script_idx: usize,
    /// Offset of the next operation within the current script.
    pub script_off: usize,
    /// Transaction context for `checksig`.
    pub tx_context: Option<&'a dyn TxContext>,
    /// The transaction input index being verified.
    pub input_idx: usize,
}

impl<'a> Thread<'a> {
    /// Create a thread that runs `scripts` in order from `stack`.
    pub fn new(
        scripts: Vec<&'a Script>,
        stack: Stack,
        tx_context: Option<&'a dyn TxContext>,
        input_idx: usize,
    ) -> Self {
        Thread {
            dstack: stack,
            scripts,
            script_idx: 0,
            script_off: 0,
            tx_context,
            input_idx,
        }
    }

    /// The script currently executing.
    pub fn current_script(&self) -> &'a Script {
        self.scripts[self.script_idx]
    }

    /// Run every remaining operation of every script.
    pub fn execute(&mut self) -> Result<(), InterpreterError> {
        while !self.step()? {}
        Ok(())
    }

    /// Execute one operation. Returns true once every script has finished.
    pub fn step(&mut self) -> Result<bool, InterpreterError> {
        // skip finished or empty scripts
        while self.script_idx < self.scripts.len()
            && self.script_off >= self.scripts[self.script_idx].len()
        {
            self.script_idx += 1;
            self.script_off = 0;
        }
        if self.script_idx >= self.scripts.len() {
            return Ok(true);
        }

        let script = self.current_script();
        let op = &script.operations()[self.script_off];
        self.execute_opcode(op)?;
        self.script_off += 1;

        Ok(false)
    }

    /// Dispatch `op`, then push its data if it carries any.
    fn execute_opcode(&mut self, op: &Operation) -> Result<(), InterpreterError> {
        debug!(
            target: LOG_TARGET,
            "Run: {} (script {}, op {})", op.opcode(), self.script_idx, self.script_off
        );

        self.dispatch_opcode(op)?;

        if !op.data().is_empty() {
            if !op.is_push() {
                return Err(InterpreterError::new(
                    InterpreterErrorCode::Internal,
                    format!("non-push opcode {} carries data", op.opcode()),
                ));
            }
            self.dstack.push_byte_array(op.data().to_vec());
        }
        Ok(())
    }

    fn dispatch_opcode(&mut self, op: &Operation) -> Result<(), InterpreterError> {
        match op.opcode() {
            Opcode::RawData => Err(InterpreterError::new(
                InterpreterErrorCode::RawDataExecuted,
                "raw_data is not executable".to_string(),
            )),

            // data is pushed after dispatch
            Opcode::Special | Opcode::PushData1 | Opcode::PushData2 | Opcode::PushData4 => Ok(()),

            Opcode::Nop => Ok(()),
            Opcode::Drop => self.op_drop(),
            Opcode::Dup => self.op_dup(),
            Opcode::Sha256 => self.op_hash(DigestKind::Sha256),
            Opcode::Hash160 => self.op_hash(DigestKind::Hash160),
            Opcode::Equal => self.op_equal(),
            Opcode::EqualVerify => self.op_equalverify(),
            Opcode::CheckSig => self.op_checksig(),

            Opcode::BadOperation(b) => {
                error!(target: LOG_TARGET, "Unimplemented operation <none {}>", b);
                Err(InterpreterError::new(
                    InterpreterErrorCode::UnimplementedOpcode,
                    format!("unimplemented operation <none {}>", b),
                ))
            }
        }
    }

    /// Read the final result: the top item cast to a boolean.
    pub fn check_error_condition(&self) -> Result<(), InterpreterError> {
        let top = match self.dstack.peek_byte_array(0) {
            Ok(top) => top,
            Err(_) => {
                error!(target: LOG_TARGET, "Script left no data on the stack");
                return Err(InterpreterError::new(
                    InterpreterErrorCode::EmptyStack,
                    "script left no data on the stack".to_string(),
                ));
            }
        };

        if !as_bool(top) {
            return Err(InterpreterError::new(
                InterpreterErrorCode::EvalFalse,
                "false stack entry at end of script execution".to_string(),
            ));
        }
        Ok(())
    }

    /// Consume the thread, returning its stack.
    pub fn into_stack(self) -> Stack {
        self.dstack
    }
}
