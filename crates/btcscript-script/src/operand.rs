//! Operand codec for push headers.
//!
//! A direct push (opcode byte 0 to 75) carries its length in the opcode byte
//! itself. The `pushdata1/2/4` forms are followed by a 1, 2 or 4 byte count.
//! Multi-byte counts are collected in stream order, the collected bytes are
//! reversed, and the result is read as a big-endian integer. Encoding writes
//! the count so that this decode reproduces it.

use crate::opcodes::{Opcode, MAX_DIRECT_PUSH, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::ScriptError;

/// Width of the explicit length field that follows a push opcode.
pub fn length_field_width(opcode: Opcode) -> usize {
    match opcode {
        Opcode::PushData1 => 1,
        Opcode::PushData2 => 2,
        Opcode::PushData4 => 4,
        _ => 0,
    }
}

/// Largest payload length representable by a push opcode, or `None` for
/// opcodes that do not push.
pub fn max_push_length(opcode: Opcode) -> Option<usize> {
    match opcode {
        Opcode::Special => Some(MAX_DIRECT_PUSH as usize),
        Opcode::PushData1 => Some(u8::MAX as usize),
        Opcode::PushData2 => Some(u16::MAX as usize),
        Opcode::PushData4 => Some(u32::MAX as usize),
        _ => None,
    }
}

/// Decode the declared payload length of the operation starting with `raw_byte`.
///
/// # Arguments
/// * `raw_byte` - The opcode byte just read from the script.
/// * `rest` - The script bytes following `raw_byte`.
///
/// # Returns
/// `(declared_length, header_bytes_consumed)`. Non-push opcodes report
/// `(0, 0)`. A length field cut short by the end of `rest` is an error.
pub fn decode_push_length(raw_byte: u8, rest: &[u8]) -> Result<(usize, usize), ScriptError> {
    let opcode = Opcode::from_byte(raw_byte);
    if opcode == Opcode::Special {
        return Ok((raw_byte as usize, 0));
    }

    let width = length_field_width(opcode);
    let field = rest.get(..width).ok_or(ScriptError::PrematureEnd {
        offset: 0,
        needed: width,
        available: rest.len(),
    })?;

    let mut collected = field.to_vec();
    collected.reverse();
    let length = collected
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((length, width))
}

/// Encode the header bytes that precede a push payload.
///
/// For `Special` this is the single length byte; for `pushdata1/2/4` it is
/// the opcode byte followed by the length field. Returns `None` for opcodes
/// that do not push.
///
/// `data_length` must not exceed [`max_push_length`] for `opcode`;
/// [`Operation`](crate::Operation) guarantees this for every operation it holds.
pub fn encode_push_header(opcode: Opcode, data_length: usize) -> Option<Vec<u8>> {
    debug_assert!(max_push_length(opcode).map_or(true, |max| data_length <= max));
    let header = match opcode {
        Opcode::Special => vec![data_length as u8],
        Opcode::PushData1 => vec![OP_PUSHDATA1, data_length as u8],
        Opcode::PushData2 => {
            let mut h = vec![OP_PUSHDATA2];
            h.extend_from_slice(&(data_length as u16).to_le_bytes());
            h
        }
        Opcode::PushData4 => {
            let mut h = vec![OP_PUSHDATA4];
            h.extend_from_slice(&(data_length as u32).to_le_bytes());
            h
        }
        _ => return None,
    };
    Some(header)
}

/// Pick the smallest push form able to carry `data_length` bytes.
pub fn smallest_push(data_length: usize) -> Result<Opcode, ScriptError> {
    [
        Opcode::Special,
        Opcode::PushData1,
        Opcode::PushData2,
        Opcode::PushData4,
    ]
    .into_iter()
    .find(|op| max_push_length(*op).map_or(false, |max| data_length <= max))
    .ok_or(ScriptError::DataTooBig {
        opcode: Opcode::PushData4,
        len: data_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_push_length_is_the_byte() {
        assert_eq!(decode_push_length(0x00, &[]).unwrap(), (0, 0));
        assert_eq!(decode_push_length(0x01, &[0xaa]).unwrap(), (1, 0));
        assert_eq!(decode_push_length(0x4b, &[]).unwrap(), (75, 0));
    }

    #[test]
    fn test_non_push_has_no_length() {
        assert_eq!(decode_push_length(0x76, &[0x10, 0x20]).unwrap(), (0, 0));
        assert_eq!(decode_push_length(0xab, &[]).unwrap(), (0, 0));
    }

    #[test]
    fn test_pushdata_lengths() {
        assert_eq!(decode_push_length(0x4c, &[0xff, 0x00]).unwrap(), (255, 1));
        // bytes 0x01 0x02 collected, reversed to 0x02 0x01, read big-endian
        assert_eq!(decode_push_length(0x4d, &[0x01, 0x02]).unwrap(), (0x0201, 2));
        assert_eq!(
            decode_push_length(0x4e, &[0x01, 0x02, 0x03, 0x04]).unwrap(),
            (0x0403_0201, 4)
        );
    }

    #[test]
    fn test_truncated_length_field() {
        assert!(matches!(
            decode_push_length(0x4c, &[]),
            Err(ScriptError::PrematureEnd { needed: 1, available: 0, .. })
        ));
        assert!(decode_push_length(0x4d, &[0x01]).is_err());
        assert!(decode_push_length(0x4e, &[0x01, 0x02, 0x03]).is_err());
    }

    #[test]
    fn test_header_encoding() {
        assert_eq!(encode_push_header(Opcode::Special, 20), Some(vec![0x14]));
        assert_eq!(encode_push_header(Opcode::PushData1, 200), Some(vec![0x4c, 0xc8]));
        assert_eq!(
            encode_push_header(Opcode::PushData2, 0x0201),
            Some(vec![0x4d, 0x01, 0x02])
        );
        assert_eq!(
            encode_push_header(Opcode::PushData4, 0x0403_0201),
            Some(vec![0x4e, 0x01, 0x02, 0x03, 0x04])
        );
        assert_eq!(encode_push_header(Opcode::Dup, 0), None);
        assert_eq!(encode_push_header(Opcode::RawData, 4), None);
    }

    #[test]
    fn test_header_decodes_to_same_length() {
        for (op, len) in [
            (Opcode::PushData1, 0usize),
            (Opcode::PushData1, 76),
            (Opcode::PushData2, 256),
            (Opcode::PushData2, 65535),
            (Opcode::PushData4, 65536),
            (Opcode::PushData4, 0x1234_5678),
        ] {
            let header = encode_push_header(op, len).unwrap();
            let (decoded, used) = decode_push_length(header[0], &header[1..]).unwrap();
            assert_eq!(decoded, len);
            assert_eq!(used, header.len() - 1);
        }
    }

    #[test]
    fn test_smallest_push() {
        assert_eq!(smallest_push(0).unwrap(), Opcode::Special);
        assert_eq!(smallest_push(75).unwrap(), Opcode::Special);
        assert_eq!(smallest_push(76).unwrap(), Opcode::PushData1);
        assert_eq!(smallest_push(255).unwrap(), Opcode::PushData1);
        assert_eq!(smallest_push(256).unwrap(), Opcode::PushData2);
        assert_eq!(smallest_push(65536).unwrap(), Opcode::PushData4);
    }
}
