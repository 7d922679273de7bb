//! Low-level byte reading utilities.
//!
//! RIP files are finite, fully-available byte buffers, so the cursor reads
//! sequentially over a slice and never seeks backward. Every read advances
//! the internal offset; running past the end fails with
//! [`RipError::TruncatedInput`].

use byteorder::{ByteOrder, LittleEndian};

use crate::rip::types::error::{Result, RipError};

/// Sequential little-endian reader over a fixed byte source.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset from the start of the byte source.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Takes the next `len` bytes, advancing the cursor.
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(RipError::TruncatedInput {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads a little-endian unsigned 32-bit value.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Reads a little-endian signed 32-bit value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Reads a little-endian IEEE-754 32-bit float.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Reads a null-terminated ASCII string, consuming the terminator.
    ///
    /// The returned text excludes the zero byte. A missing terminator is a
    /// truncation: the string would extend past the end of the source.
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.data[self.pos..];
        let end = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(RipError::TruncatedInput {
                offset: self.pos,
                needed: rest.len() + 1,
                available: rest.len(),
            })?;
        let text = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.pos += end + 1;
        Ok(text)
    }
}
