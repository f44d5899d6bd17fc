//! Position-tracked reader/writer over mission file bytes.
//!
//! Every jump through a record is a named operation (`seek`, `skip`) instead of
//! bare position arithmetic, and the writer zero-fills any gap it seeks across,
//! so reserved ranges come out zeroed without the codec touching them.

use crate::codec::FormatError;
use byteorder::{ByteOrder, LittleEndian};

/// Read cursor over a borrowed byte slice. All multi-byte reads are little-endian.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn need(&self, n: usize) -> Result<(), FormatError> {
        if self.pos + n > self.data.len() {
            Err(FormatError::Truncated { offset: self.pos, needed: n })
        } else {
            Ok(())
        }
    }

    pub fn seek(&mut self, offset: usize) -> Result<(), FormatError> {
        if offset > self.data.len() {
            return Err(FormatError::Truncated { offset, needed: 0 });
        }
        self.pos = offset;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<(), FormatError> {
        self.need(n)?;
        self.pos += n;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        self.need(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8, FormatError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_bool(&mut self) -> Result<bool, FormatError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        self.need(2)?;
        let v = LittleEndian::read_u16(&self.data[self.pos..]);
        self.pos += 2;
        Ok(v)
    }

    pub fn read_i16(&mut self) -> Result<i16, FormatError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        self.need(n)?;
        let s = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    /// Fixed-width string buffer: consumes exactly `n` bytes, returns the text
    /// up to the first NUL. Non-ASCII bytes are replaced.
    pub fn read_cstring(&mut self, n: usize) -> Result<String, FormatError> {
        let raw = self.read_bytes(n)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    /// Length-prefixed string: i16 byte count, then the bytes (no terminator).
    pub fn read_lpstring(&mut self) -> Result<String, FormatError> {
        let len = self.read_i16()?;
        if len < 0 {
            return Err(FormatError::Truncated { offset: self.pos, needed: 0 });
        }
        let raw = self.read_bytes(len as usize)?;
        Ok(String::from_utf8_lossy(raw).into_owned())
    }
}

/// Write cursor backed by a growable buffer. Seeking past the end extends the
/// buffer with zeros; record encoders seek to `base + i * stride` absolutely.
pub struct Writer {
    buf: Vec<u8>,
    pos: usize,
}

impl Writer {
    pub fn new() -> Self {
        Writer { buf: Vec::new(), pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, offset: usize) {
        if offset > self.buf.len() {
            self.buf.resize(offset, 0);
        }
        self.pos = offset;
    }

    pub fn skip(&mut self, n: usize) {
        self.seek(self.pos + n);
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    pub fn write_u8(&mut self, v: u8) {
        self.put(&[v]);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.put(&[v as u8]);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.put(&[v as u8]);
    }

    pub fn write_u16(&mut self, v: u16) {
        let mut b = [0u8; 2];
        LittleEndian::write_u16(&mut b, v);
        self.put(&b);
    }

    pub fn write_i16(&mut self, v: i16) {
        self.write_u16(v as u16);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Fixed-width string buffer: text truncated to `n - 1` bytes, NUL-padded.
    pub fn write_cstring(&mut self, s: &str, n: usize) {
        let mut field = vec![0u8; n];
        let bytes = s.as_bytes();
        let take = bytes.len().min(n.saturating_sub(1));
        field[..take].copy_from_slice(&bytes[..take]);
        self.put(&field);
    }

    /// Length-prefixed string: i16 byte count, then the bytes.
    pub fn write_lpstring(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let take = bytes.len().min(i16::MAX as usize);
        self.write_i16(take as i16);
        self.put(&bytes[..take]);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}
