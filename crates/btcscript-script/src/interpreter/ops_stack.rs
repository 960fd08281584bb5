//! Stack manipulation and comparison operations.

use super::error::{InterpreterError, InterpreterErrorCode};
use super::thread::Thread;

impl<'a> Thread<'a> {
    pub(crate) fn op_drop(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(1, "drop")?;
        self.dstack.pop_byte_array()?;
        Ok(())
    }

    pub(crate) fn op_dup(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(1, "dup")?;
        self.dstack.dup_top()
    }

    /// Pops two items and pushes `{0x01}` if they are byte-equal, else `{0x00}`.
    pub(crate) fn op_equal(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(2, "equal")?;
        let a = self.dstack.pop_byte_array()?;
        let b = self.dstack.pop_byte_array()?;
        self.dstack.push_bool(a == b);
        Ok(())
    }

    /// Pops two items; succeeds only if they are byte-equal. Pushes nothing.
    pub(crate) fn op_equalverify(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(2, "equalverify")?;
        let a = self.dstack.pop_byte_array()?;
        let b = self.dstack.pop_byte_array()?;
        if a != b {
            return Err(InterpreterError::new(
                InterpreterErrorCode::EqualVerify,
                "equalverify failed: items differ".to_string(),
            ));
        }
        Ok(())
    }
}
