//! Script execution stack.

use super::error::{InterpreterError, InterpreterErrorCode};

/// Convert a stack item to a boolean.
///
/// Empty and all-zero items are false. A final `0x80` byte preceded only by
/// zeros is negative zero and also false. Anything else is true.
pub fn as_bool(t: &[u8]) -> bool {
    for (i, &b) in t.iter().enumerate() {
        if b != 0 {
            // Negative 0 is also considered false
            return !(i == t.len() - 1 && b == 0x80);
        }
    }
    false
}

/// Canonical stack marker for a boolean: `{0x01}` or `{0x00}`.
pub fn from_bool(v: bool) -> Vec<u8> {
    if v {
        vec![1]
    } else {
        vec![0]
    }
}

/// The data stack used by the interpreter.
///
/// Every removal checks depth first, so an opcode that needs more items
/// than are present gets `InvalidStackOperation` instead of underflowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    stk: Vec<Vec<u8>>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    /// Build a stack whose last element is the top.
    pub fn from_items(items: Vec<Vec<u8>>) -> Self {
        Stack { stk: items }
    }

    pub fn depth(&self) -> usize {
        self.stk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stk.is_empty()
    }

    /// Items bottom to top.
    pub fn items(&self) -> &[Vec<u8>] {
        &self.stk
    }

    pub fn into_items(self) -> Vec<Vec<u8>> {
        self.stk
    }

    /// Fail unless at least `n` items are present.
    pub fn require(&self, n: usize, op_name: &str) -> Result<(), InterpreterError> {
        if self.stk.len() < n {
            return Err(InterpreterError::new(
                InterpreterErrorCode::InvalidStackOperation,
                format!(
                    "{} requires {} stack items, {} present",
                    op_name,
                    n,
                    self.stk.len()
                ),
            ));
        }
        Ok(())
    }

    pub fn push_byte_array(&mut self, data: Vec<u8>) {
        self.stk.push(data);
    }

    pub fn push_bool(&mut self, val: bool) {
        self.push_byte_array(from_bool(val));
    }

    pub fn pop_byte_array(&mut self) -> Result<Vec<u8>, InterpreterError> {
        self.stk.pop().ok_or_else(|| {
            InterpreterError::new(
                InterpreterErrorCode::InvalidStackOperation,
                "attempt to pop from an empty stack".to_string(),
            )
        })
    }

    /// Return the item `idx` positions below the top without removing it.
    pub fn peek_byte_array(&self, idx: usize) -> Result<&[u8], InterpreterError> {
        let sz = self.stk.len();
        if idx >= sz {
            return Err(InterpreterError::new(
                InterpreterErrorCode::InvalidStackOperation,
                format!("index {} is invalid for stack size {}", idx, sz),
            ));
        }
        Ok(&self.stk[sz - idx - 1])
    }

    /// Duplicate the top item.
    pub fn dup_top(&mut self) -> Result<(), InterpreterError> {
        let top = self.peek_byte_array(0)?.to_vec();
        self.push_byte_array(top);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bool() {
        assert!(!as_bool(&[]));
        assert!(!as_bool(&[0x00]));
        assert!(!as_bool(&[0x80]));
        assert!(as_bool(&[0x01]));
        assert!(as_bool(&[0x00, 0x01]));
        assert!(!as_bool(&[0x00, 0x80]));
        assert!(!as_bool(&[0x00, 0x00, 0x00]));
        assert!(as_bool(&[0x80, 0x00]));
        assert!(as_bool(&[0x00, 0x81]));
        assert!(as_bool(&[0x01, 0x80]));
    }

    #[test]
    fn test_markers() {
        assert_eq!(from_bool(true), vec![0x01]);
        assert_eq!(from_bool(false), vec![0x00]);
        assert!(as_bool(&from_bool(true)));
        assert!(!as_bool(&from_bool(false)));
    }

    #[test]
    fn test_pop_empty_is_error() {
        let mut s = Stack::new();
        let err = s.pop_byte_array().unwrap_err();
        assert_eq!(err.code, InterpreterErrorCode::InvalidStackOperation);
        assert!(s.dup_top().is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn test_require() {
        let mut s = Stack::new();
        s.push_byte_array(vec![1]);
        assert!(s.require(1, "drop").is_ok());
        let err = s.require(2, "equal").unwrap_err();
        assert!(err.description.contains("equal requires 2"));
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn test_peek_and_dup() {
        let mut s = Stack::from_items(vec![vec![1], vec![2]]);
        assert_eq!(s.peek_byte_array(0).unwrap(), &[2]);
        assert_eq!(s.peek_byte_array(1).unwrap(), &[1]);
        assert!(s.peek_byte_array(2).is_err());
        s.dup_top().unwrap();
        assert_eq!(s.items(), &[vec![1], vec![2], vec![2]]);
        assert_eq!(s.pop_byte_array().unwrap(), vec![2]);
        assert_eq!(s.into_items(), vec![vec![1], vec![2]]);
    }
}
