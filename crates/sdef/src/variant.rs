//! Tagged primitive values and their binary coding.
//!
//! A [`Variant`] is the leaf payload of the parameter tree: exactly one
//! primitive plus the rules to decode it from and encode it back to the
//! instance data stream.

use std::io::{self, Write};

use sdef_common::{BinaryReader, BinaryWriter};

use crate::types::ValueTag;
use crate::{Error, Result};

/// A single typed value held by a leaf parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// Unsigned 8-bit integer.
    Byte(u8),
    /// Signed 8-bit integer.
    SByte(i8),
    /// Boolean value.
    Bool(bool),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// 32-bit floating point.
    Float32(f32),
    /// 64-bit floating point.
    Float64(f64),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// String value.
    String(String),
}

impl Variant {
    /// The wire type code for this value.
    pub fn tag(&self) -> ValueTag {
        match self {
            Self::Byte(_) => ValueTag::Byte,
            Self::SByte(_) => ValueTag::SByte,
            Self::Bool(_) => ValueTag::Bool,
            Self::Int32(_) => ValueTag::Int32,
            Self::UInt32(_) => ValueTag::UInt32,
            Self::Float32(_) => ValueTag::Float32,
            Self::Float64(_) => ValueTag::Float64,
            Self::UInt64(_) => ValueTag::UInt64,
            Self::String(_) => ValueTag::String,
        }
    }

    /// Decode one value with the given type code from the data stream.
    ///
    /// Fixed-width little-endian for the numeric kinds; strings are a u32
    /// byte count followed by that many UTF-8 bytes, no terminator. Some
    /// historical tooling wrote a character count instead, which only
    /// agrees with the byte count for ASCII payloads; such files are not
    /// specially handled.
    ///
    /// `legacy` selects the decode rules of the older sub-format: strings
    /// and 64-bit integers are rejected, except that type code 14 skips
    /// eight bytes and substitutes `Int32(1)`. That substitution matches
    /// files observed in the wild and is kept as a compatibility branch;
    /// it is not a confirmed format rule and newly authored files should
    /// not rely on it.
    pub fn decode(tag: u16, reader: &mut BinaryReader<'_>, legacy: bool) -> Result<Self> {
        let offset = reader.position();
        match ValueTag::from_u16(tag) {
            Some(ValueTag::Byte) => Ok(Self::Byte(reader.read_u8()?)),
            Some(ValueTag::SByte) => Ok(Self::SByte(reader.read_i8()?)),
            Some(ValueTag::Bool) => Ok(Self::Bool(reader.read_bool()?)),
            Some(ValueTag::Int32) => Ok(Self::Int32(reader.read_i32()?)),
            Some(ValueTag::UInt32) => Ok(Self::UInt32(reader.read_u32()?)),
            Some(ValueTag::Float32) => Ok(Self::Float32(reader.read_f32()?)),
            Some(ValueTag::Float64) => Ok(Self::Float64(reader.read_f64()?)),
            Some(ValueTag::UInt64) if legacy => {
                // Observed legacy behavior: payload skipped, value forced to 1.
                reader.read_bytes(8)?;
                Ok(Self::Int32(1))
            }
            Some(ValueTag::UInt64) => Ok(Self::UInt64(reader.read_u64()?)),
            Some(ValueTag::String) if !legacy => {
                let length = reader.read_u32()? as usize;
                let value = reader.read_string(length)?;
                Ok(Self::String(value.to_owned()))
            }
            _ => Err(Error::UnsupportedType { tag, offset }),
        }
    }

    /// Encode this value, the exact inverse of [`Variant::decode`].
    pub fn encode<W: Write>(&self, writer: &mut BinaryWriter<W>) -> io::Result<()> {
        match self {
            Self::Byte(v) => writer.write_u8(*v),
            Self::SByte(v) => writer.write_i8(*v),
            Self::Bool(v) => writer.write_bool(*v),
            Self::Int32(v) => writer.write_i32(*v),
            Self::UInt32(v) => writer.write_u32(*v),
            Self::Float32(v) => writer.write_f32(*v),
            Self::Float64(v) => writer.write_f64(*v),
            Self::UInt64(v) => writer.write_u64(*v),
            Self::String(v) => {
                writer.write_u32(v.len() as u32)?;
                writer.write_bytes(v.as_bytes())
            }
        }
    }

    /// Try to get this value as a bool.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::SByte(v) => Some(*v as i32),
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a u32.
    #[inline]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Byte(v) => Some(*v as u32),
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a u64.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Byte(v) => Some(*v as u64),
            Self::UInt32(v) => Some(*v as u64),
            Self::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as an f32.
    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{}", v),
            Self::SByte(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::UInt32(v) => write!(f, "{}", v),
            Self::Float32(v) => write!(f, "{}", v),
            Self::Float64(v) => write!(f, "{}", v),
            Self::UInt64(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_vec(value: &Variant) -> Vec<u8> {
        let mut out = Vec::new();
        let mut writer = BinaryWriter::new(&mut out);
        value.encode(&mut writer).unwrap();
        out
    }

    #[test]
    fn test_decode_primitives() {
        let data = [0x2A, 0, 0, 0];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(
            Variant::decode(ValueTag::Int32 as u16, &mut reader, false).unwrap(),
            Variant::Int32(42)
        );

        let data = 1.5f32.to_le_bytes();
        let mut reader = BinaryReader::new(&data);
        assert_eq!(
            Variant::decode(ValueTag::Float32 as u16, &mut reader, false).unwrap(),
            Variant::Float32(1.5)
        );

        let data = [2u8];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(
            Variant::decode(ValueTag::Bool as u16, &mut reader, false).unwrap(),
            Variant::Bool(true)
        );
    }

    #[test]
    fn test_encode_is_inverse_of_decode() {
        let values = [
            Variant::Byte(0xAB),
            Variant::SByte(-5),
            Variant::Bool(false),
            Variant::Int32(-123456),
            Variant::UInt32(0xDEADBEEF),
            Variant::Float32(3.25),
            Variant::Float64(-0.5),
            Variant::UInt64(u64::MAX),
            Variant::String("hello".to_owned()),
        ];

        for value in values {
            let bytes = encode_to_vec(&value);
            let mut reader = BinaryReader::new(&bytes);
            let decoded = Variant::decode(value.tag() as u16, &mut reader, false).unwrap();
            assert_eq!(decoded, value);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_string_coding() {
        let value = Variant::String("turbo".to_owned());
        let bytes = encode_to_vec(&value);
        assert_eq!(&bytes[..4], &5u32.to_le_bytes());
        assert_eq!(&bytes[4..], b"turbo");
    }

    #[test]
    fn test_string_count_is_bytes_not_chars() {
        // "café" is four characters but five UTF-8 bytes.
        let value = Variant::String("café".to_owned());
        let bytes = encode_to_vec(&value);
        assert_eq!(&bytes[..4], &5u32.to_le_bytes());

        let mut reader = BinaryReader::new(&bytes);
        let decoded = Variant::decode(ValueTag::String as u16, &mut reader, false).unwrap();
        assert_eq!(decoded, value);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_unsupported_tag_reports_offset() {
        let data = [0u8; 8];
        let mut reader = BinaryReader::new(&data);
        reader.read_u32().unwrap();

        let err = Variant::decode(99, &mut reader, false).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { tag: 99, offset: 4 }));
    }

    #[test]
    fn test_legacy_uint64_substitution() {
        let data = [0xFFu8; 8];
        let mut reader = BinaryReader::new(&data);

        let value = Variant::decode(ValueTag::UInt64 as u16, &mut reader, true).unwrap();
        assert_eq!(value, Variant::Int32(1));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_legacy_rejects_string() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);

        let err = Variant::decode(ValueTag::String as u16, &mut reader, true).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { tag: 3, offset: 0 }));
    }
}
