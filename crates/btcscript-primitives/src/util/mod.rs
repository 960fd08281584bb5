//! Binary wire helpers.
//!
//! Provides VarInt encoding/decoding plus `WireReader` and `WireWriter` for
//! reading and writing the little-endian transaction wire format.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A variable-length integer as used for counts and lengths on the wire.
///
/// Values below 0xfd occupy one byte; larger values get a 0xfd/0xfe/0xff
/// marker followed by a 2/4/8-byte little-endian integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the front of a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// `Ok((VarInt, bytes_consumed))`, or an error if the slice is too short.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = WireReader::new(data);
        let value = reader.read_varint()?;
        Ok((value, data.len() - reader.remaining()))
    }

    /// Return the wire-format byte length of this VarInt.
    pub fn length(&self) -> usize {
        match self.0 {
            0..=0xfc => 1,
            0xfd..=0xffff => 3,
            0x1_0000..=0xffff_ffff => 5,
            _ => 9,
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut buf = Vec::with_capacity(self.length());
        match self.length() {
            1 => buf.push(v as u8),
            3 => {
                buf.push(0xfd);
                buf.extend_from_slice(&(v as u16).to_le_bytes());
            }
            5 => {
                buf.push(0xfe);
                buf.extend_from_slice(&(v as u32).to_le_bytes());
            }
            _ => {
                buf.push(0xff);
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }
        buf
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// WireReader
// ---------------------------------------------------------------------------

/// A cursor over a byte slice for decoding wire data.
///
/// Every read checks the remaining length first and reports
/// `PrimitivesError::UnexpectedEof` instead of panicking.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// # Returns
    /// The decoded `VarInt`, or an error if the marker's payload is truncated.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let value = match self.read_u8()? {
            0xff => self.read_u64_le()?,
            0xfe => self.read_u32_le()? as u64,
            0xfd => self.read_u16_le()? as u64,
            b => b as u64,
        };
        Ok(VarInt(value))
    }

    /// Read a VarInt length prefix followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_varint()?.value();
        let len = usize::try_from(len).map_err(|_| PrimitivesError::UnexpectedEof {
            needed: usize::MAX,
            remaining: self.remaining(),
        })?;
        self.read_bytes(len)
    }

    /// Return the number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// An append-only buffer for encoding wire data.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        WireWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        WireWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u32.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Append a VarInt length prefix followed by `bytes`.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_size_classes() {
        let cases: [(u64, &str); 8] = [
            (0, "00"),
            (0xfc, "fc"),
            (0xfd, "fdfd00"),
            (0xffff, "fdffff"),
            (0x1_0000, "fe00000100"),
            (0xffff_ffff, "feffffffff"),
            (0x1_0000_0000, "ff0000000001000000"),
            (u64::MAX, "ffffffffffffffffff"),
        ];
        for (value, expected) in cases {
            let encoded = VarInt(value).to_bytes();
            assert_eq!(hex::encode(&encoded), expected, "value {value:#x}");
            assert_eq!(encoded.len(), VarInt(value).length());
            let (decoded, used) = VarInt::from_bytes(&encoded).unwrap();
            assert_eq!(decoded.value(), value);
            assert_eq!(used, encoded.len());
        }
    }

    #[test]
    fn test_varint_truncated() {
        assert!(VarInt::from_bytes(&[]).is_err());
        assert!(VarInt::from_bytes(&[0xfd, 0x01]).is_err());
        assert!(VarInt::from_bytes(&[0xff, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_reader_sequence() {
        let data = hex::decode("01000000ffffffff0200ca9a3b0000000003abcdef").unwrap();
        let mut r = WireReader::new(&data);
        assert_eq!(r.read_u32_le().unwrap(), 1);
        assert_eq!(r.read_u32_le().unwrap(), 0xffff_ffff);
        assert_eq!(r.read_u8().unwrap(), 2);
        assert_eq!(r.read_u64_le().unwrap(), 1_000_000_000);
        assert_eq!(r.read_var_bytes().unwrap(), &[0xab, 0xcd, 0xef]);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_reader_eof_reports_sizes() {
        let mut r = WireReader::new(&[1, 2]);
        match r.read_u32_le() {
            Err(PrimitivesError::UnexpectedEof { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected eof, got {:?}", other),
        }
        // a failed read does not advance
        assert_eq!(r.read_u16_le().unwrap(), 0x0201);
    }

    #[test]
    fn test_writer_roundtrip() {
        let mut w = WireWriter::with_capacity(16);
        assert!(w.is_empty());
        w.write_u32_le(1);
        w.write_var_bytes(&[0xab, 0xcd]);
        w.write_u64_le(u64::MAX);
        w.write_u8(7);
        assert_eq!(w.len(), 4 + 3 + 8 + 1);
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        assert_eq!(r.read_u32_le().unwrap(), 1);
        assert_eq!(r.read_var_bytes().unwrap(), &[0xab, 0xcd]);
        assert_eq!(r.read_u64_le().unwrap(), u64::MAX);
        assert_eq!(r.read_u8().unwrap(), 7);
    }
}
