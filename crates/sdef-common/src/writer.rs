//! Binary writer for serializing little-endian streams.
//!
//! This module provides [`BinaryWriter`], the writing counterpart to
//! [`BinaryReader`](crate::BinaryReader). It wraps any [`Write`] sink and
//! emits little-endian values through [`byteorder`].

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

/// A little-endian binary writer over any [`Write`] sink.
///
/// # Example
///
/// ```
/// use sdef_common::BinaryWriter;
///
/// let mut out = Vec::new();
/// let mut writer = BinaryWriter::new(&mut out);
/// writer.write_u32(0x04030201).unwrap();
/// assert_eq!(out, [0x01, 0x02, 0x03, 0x04]);
/// ```
#[derive(Debug)]
pub struct BinaryWriter<W> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    /// Create a new writer over a sink.
    #[inline]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consume the writer and return the underlying sink.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    /// Write a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_u8(value)
    }

    /// Write a signed byte.
    #[inline]
    pub fn write_i8(&mut self, value: i8) -> io::Result<()> {
        self.inner.write_i8(value)
    }

    /// Write a boolean as a single byte (1/0).
    #[inline]
    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.inner.write_u8(value as u8)
    }

    /// Write a little-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_u16::<LittleEndian>(value)
    }

    /// Write a little-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_u32::<LittleEndian>(value)
    }

    /// Write a little-endian i32.
    #[inline]
    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_i32::<LittleEndian>(value)
    }

    /// Write a little-endian u64.
    #[inline]
    pub fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.inner.write_u64::<LittleEndian>(value)
    }

    /// Write a little-endian f32.
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.inner.write_f32::<LittleEndian>(value)
    }

    /// Write a little-endian f64.
    #[inline]
    pub fn write_f64(&mut self, value: f64) -> io::Result<()> {
        self.inner.write_f64::<LittleEndian>(value)
    }

    /// Write a string as raw UTF-8 bytes followed by a null terminator.
    pub fn write_cstr(&mut self, value: &str) -> io::Result<()> {
        self.inner.write_all(value.as_bytes())?;
        self.inner.write_u8(0)
    }

    /// Flush the underlying sink.
    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_primitives() {
        let mut out = Vec::new();
        let mut writer = BinaryWriter::new(&mut out);

        writer.write_u16(0x0201).unwrap();
        writer.write_i32(-1).unwrap();
        writer.write_bool(true).unwrap();

        assert_eq!(out, [0x01, 0x02, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
    }

    #[test]
    fn test_write_cstr() {
        let mut out = Vec::new();
        let mut writer = BinaryWriter::new(&mut out);

        writer.write_cstr("abc").unwrap();
        assert_eq!(out, b"abc\0");
    }

    #[test]
    fn test_floats_round_trip_through_reader() {
        let mut out = Vec::new();
        let mut writer = BinaryWriter::new(&mut out);
        writer.write_f32(1.5).unwrap();
        writer.write_f64(-2.25).unwrap();

        let mut reader = crate::BinaryReader::new(&out);
        assert_eq!(reader.read_f32().unwrap(), 1.5);
        assert_eq!(reader.read_f64().unwrap(), -2.25);
    }
}
