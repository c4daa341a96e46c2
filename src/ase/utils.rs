//! Low-level byte reading utilities

use std::io::{Cursor, Read};
use byteorder::{LittleEndian, ReadBytesExt};
use super::types::error::{AseError, Result};

/// Sequential little-endian reader over an in-memory buffer.
///
/// Every read advances the cursor; there is no seeking backwards. Reads
/// that run past the end of the buffer fail with
/// [`AseError::TruncatedInput`] carrying the absolute file offset.
#[derive(Debug)]
pub struct AseReader<'a> {
    cursor: Cursor<&'a [u8]>,
    /// Absolute offset of `cursor`'s first byte within the file.
    base: u64,
}

impl<'a> AseReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    fn with_base(data: &'a [u8], base: u64) -> Self {
        Self {
            cursor: Cursor::new(data),
            base,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub fn position(&self) -> u64 {
        self.base + self.cursor.position()
    }

    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(AseError::TruncatedInput {
                offset: self.position(),
                needed: needed as u64,
                available: self.remaining() as u64,
            });
        }
        Ok(())
    }

    fn read_fixed<T>(
        &mut self,
        width: usize,
        read: impl FnOnce(&mut Cursor<&'a [u8]>) -> std::io::Result<T>,
    ) -> Result<T> {
        self.ensure(width)?;
        let offset = self.position();
        read(&mut self.cursor).map_err(|_| AseError::TruncatedInput {
            offset,
            needed: width as u64,
            available: 0,
        })
    }

    /// BYTE
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_fixed(1, |c| c.read_u8())
    }

    /// WORD
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_fixed(2, |c| c.read_u16::<LittleEndian>())
    }

    /// SHORT
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_fixed(2, |c| c.read_i16::<LittleEndian>())
    }

    /// DWORD
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_fixed(4, |c| c.read_u32::<LittleEndian>())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_fixed(len, |c| c.read_exact(&mut buf))?;
        Ok(buf)
    }

    /// Reads everything left in the buffer.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        self.read_bytes(self.remaining())
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.cursor.set_position(self.cursor.position() + len as u64);
        Ok(())
    }

    /// STRING: WORD byte length followed by UTF-8 bytes (no terminator).
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Splits off the next `len` bytes as an independent reader and advances
    /// past them. Offsets reported by the sub-reader stay absolute.
    pub fn take(&mut self, len: usize) -> Result<AseReader<'a>> {
        self.ensure(len)?;
        let start = self.cursor.position() as usize;
        let data: &'a [u8] = *self.cursor.get_ref();
        let sub = AseReader::with_base(&data[start..start + len], self.position());
        self.cursor.set_position((start + len) as u64);
        Ok(sub)
    }
}
