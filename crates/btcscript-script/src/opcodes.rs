//! Opcode values and the [`Opcode`] tag.
//!
//! Only a small set of opcodes carries behavior. Every other byte value is
//! kept as [`Opcode::BadOperation`] so it survives a parse/serialize round
//! trip and can be printed, but it fails when executed.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::ScriptError;

/// Largest length that a direct push encodes in its own opcode byte.
pub const MAX_DIRECT_PUSH: u8 = 0x4b;

pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_NOP: u8 = 0x61;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CODESEPARATOR: u8 = 0xab;
pub const OP_CHECKSIG: u8 = 0xac;

/// An instruction tag.
///
/// `RawData` and `Special` have no fixed byte value: `RawData` wraps an
/// opaque coinbase payload and is never produced by the parser, and a
/// `Special` push is encoded as its own data length (0 to 75).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    RawData,
    Special,
    PushData1,
    PushData2,
    PushData4,
    Nop,
    Drop,
    Dup,
    Sha256,
    Hash160,
    Equal,
    EqualVerify,
    CheckSig,
    /// Any other byte value, preserved for round trip and printing.
    BadOperation(u8),
}

/// Named opcodes in table order, used for name lookups.
const NAMED: [(Opcode, &str); 13] = [
    (Opcode::RawData, "raw_data"),
    (Opcode::Special, "special"),
    (Opcode::PushData1, "pushdata1"),
    (Opcode::PushData2, "pushdata2"),
    (Opcode::PushData4, "pushdata4"),
    (Opcode::Nop, "nop"),
    (Opcode::Drop, "drop"),
    (Opcode::Dup, "dup"),
    (Opcode::Sha256, "sha256"),
    (Opcode::Hash160, "hash160"),
    (Opcode::Equal, "equal"),
    (Opcode::EqualVerify, "equalverify"),
    (Opcode::CheckSig, "checksig"),
];

impl Opcode {
    /// Classify a raw script byte.
    ///
    /// Bytes 0 to 75 are direct pushes; recognized values get their named
    /// tag and everything else becomes `BadOperation(byte)`.
    pub fn from_byte(byte: u8) -> Opcode {
        match byte {
            0..=MAX_DIRECT_PUSH => Opcode::Special,
            OP_PUSHDATA1 => Opcode::PushData1,
            OP_PUSHDATA2 => Opcode::PushData2,
            OP_PUSHDATA4 => Opcode::PushData4,
            OP_NOP => Opcode::Nop,
            OP_DROP => Opcode::Drop,
            OP_DUP => Opcode::Dup,
            OP_EQUAL => Opcode::Equal,
            OP_EQUALVERIFY => Opcode::EqualVerify,
            OP_SHA256 => Opcode::Sha256,
            OP_HASH160 => Opcode::Hash160,
            OP_CHECKSIG => Opcode::CheckSig,
            other => Opcode::BadOperation(other),
        }
    }

    /// The fixed byte value of this opcode.
    ///
    /// Returns `None` for `RawData` and `Special`, whose wire form depends
    /// on the operation's data.
    pub fn to_byte(self) -> Option<u8> {
        match self {
            Opcode::RawData | Opcode::Special => None,
            Opcode::PushData1 => Some(OP_PUSHDATA1),
            Opcode::PushData2 => Some(OP_PUSHDATA2),
            Opcode::PushData4 => Some(OP_PUSHDATA4),
            Opcode::Nop => Some(OP_NOP),
            Opcode::Drop => Some(OP_DROP),
            Opcode::Dup => Some(OP_DUP),
            Opcode::Sha256 => Some(OP_SHA256),
            Opcode::Hash160 => Some(OP_HASH160),
            Opcode::Equal => Some(OP_EQUAL),
            Opcode::EqualVerify => Some(OP_EQUALVERIFY),
            Opcode::CheckSig => Some(OP_CHECKSIG),
            Opcode::BadOperation(b) => Some(b),
        }
    }

    /// Whether this is one of the four push forms.
    pub fn is_push(self) -> bool {
        matches!(
            self,
            Opcode::Special | Opcode::PushData1 | Opcode::PushData2 | Opcode::PushData4
        )
    }

    /// Lowercase name, or `<none N>` for a byte outside the named set.
    pub fn name(self) -> Cow<'static, str> {
        match self {
            Opcode::BadOperation(b) => Cow::Owned(format!("<none {}>", b)),
            named => NAMED
                .iter()
                .find(|(op, _)| *op == named)
                .map(|(_, name)| Cow::Borrowed(*name))
                .unwrap_or(Cow::Borrowed("bad_operation")),
        }
    }

    /// Inverse of [`Opcode::name`].
    ///
    /// `<none N>` is accepted only when N is a byte that has no name of its
    /// own, so every accepted string maps back to itself.
    pub fn from_name(name: &str) -> Option<Opcode> {
        if let Some((op, _)) = NAMED.iter().find(|(_, n)| *n == name) {
            return Some(*op);
        }
        let value = name.strip_prefix("<none ")?.strip_suffix('>')?;
        match Opcode::from_byte(value.parse().ok()?) {
            op @ Opcode::BadOperation(_) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Opcode {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::from_name(s).ok_or_else(|| ScriptError::UnknownOpcodeName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_byte_round_trips() {
        for b in 0..=u8::MAX {
            let op = Opcode::from_byte(b);
            match op.to_byte() {
                Some(v) => assert_eq!(v, b),
                None => {
                    assert_eq!(op, Opcode::Special);
                    assert!(b <= MAX_DIRECT_PUSH);
                }
            }
        }
    }

    #[test]
    fn test_named_values() {
        assert_eq!(Opcode::from_byte(0x76), Opcode::Dup);
        assert_eq!(Opcode::from_byte(0xa9), Opcode::Hash160);
        assert_eq!(Opcode::from_byte(0xac), Opcode::CheckSig);
        assert_eq!(Opcode::from_byte(0x00), Opcode::Special);
        assert_eq!(Opcode::from_byte(0x4b), Opcode::Special);
        assert_eq!(Opcode::from_byte(0x4c), Opcode::PushData1);
        assert_eq!(Opcode::from_byte(0xab), Opcode::BadOperation(OP_CODESEPARATOR));
        assert_eq!(Opcode::from_byte(0x51), Opcode::BadOperation(0x51));
    }

    #[test]
    fn test_names() {
        assert_eq!(Opcode::RawData.name(), "raw_data");
        assert_eq!(Opcode::EqualVerify.to_string(), "equalverify");
        assert_eq!(Opcode::BadOperation(171).to_string(), "<none 171>");
        assert_eq!(Opcode::BadOperation(0).name(), "<none 0>");
    }

    #[test]
    fn test_name_lookup_round_trip() {
        for (op, name) in NAMED {
            assert_eq!(Opcode::from_name(name), Some(op));
            assert_eq!(op.name(), name);
        }
        for b in 0..=u8::MAX {
            let op = Opcode::from_byte(b);
            assert_eq!(Opcode::from_name(&op.name()), Some(op));
        }
    }

    #[test]
    fn test_name_lookup_rejects() {
        assert_eq!(Opcode::from_name("OP_DUP"), None);
        assert_eq!(Opcode::from_name("checkmultisig"), None);
        assert_eq!(Opcode::from_name("<none 118>"), None);
        assert_eq!(Opcode::from_name("<none 300>"), None);
        assert_eq!(Opcode::from_name("<none x>"), None);
        assert!(matches!(
            "bogus".parse::<Opcode>(),
            Err(ScriptError::UnknownOpcodeName(_))
        ));
        assert_eq!("<none 81>".parse::<Opcode>().unwrap(), Opcode::BadOperation(81));
    }
}
