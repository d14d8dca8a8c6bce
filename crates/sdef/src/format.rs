//! Sub-format headers.
//!
//! Two SDEF header layouts exist in the wild. Both start with the `SDEF`
//! magic followed by a u32 word that selects the layout:
//!
//! - word >= 1: a versioned header carrying an opaque blob (u32 size plus
//!   that many bytes); array lengths are fixed in the schema.
//! - word == 0: an i32 version follows. Version 0 stores array lengths
//!   inline in the data stream. Version >= 1 is the older layout with one
//!   reserved byte, schema-fixed array lengths, and the legacy type-code
//!   quirks.

use std::io::{self, Write};

use sdef_common::{BinaryReader, BinaryWriter};

use crate::{Error, Result};

/// Magic bytes at the start of every SDEF file.
pub const SDEF_MAGIC: &[u8; 4] = b"SDEF";

/// The sub-format of an SDEF file.
///
/// The sub-format decides the header layout, whether array lengths live in
/// the schema or in the data stream, and which value type codes decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdefFormat {
    /// Version word 0: array lengths are stored inline in the data stream.
    Inline,
    /// Version word >= 1 with an opaque header blob. Array lengths are
    /// fixed in the schema. The blob is preserved so the header can be
    /// re-emitted byte-exact.
    Extended { flag: u32, blob: Vec<u8> },
    /// Older reserved-pointer layout. Array lengths are fixed in the
    /// schema; type code 14 decodes through the compatibility branch and
    /// String/UInt64 values are rejected. The version word is preserved
    /// so the header can be re-emitted byte-exact.
    Legacy { version: i32 },
}

impl SdefFormat {
    /// Whether array lengths are read from the data stream rather than
    /// taken from the schema.
    #[inline]
    pub fn lengths_inline(&self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Whether the legacy decode quirks apply.
    #[inline]
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy { .. })
    }

    /// Parse the magic and header, leaving the reader at the category table.
    pub fn parse(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let magic = reader.read_bytes(4)?;
        if magic != SDEF_MAGIC {
            return Err(Error::FormatMismatch {
                actual: [magic[0], magic[1], magic[2], magic[3]],
            });
        }

        let word = reader.read_u32()?;
        if word >= 1 {
            let blob_size = reader.read_u32()? as usize;
            let blob = reader.read_bytes(blob_size)?.to_vec();
            return Ok(Self::Extended { flag: word, blob });
        }

        let version = reader.read_i32()?;
        if version >= 1 {
            reader.read_u8()?; // reserved
            Ok(Self::Legacy { version })
        } else {
            Ok(Self::Inline)
        }
    }

    /// Write the magic and header, the exact inverse of [`SdefFormat::parse`].
    pub fn write<W: Write>(&self, writer: &mut BinaryWriter<W>) -> io::Result<()> {
        writer.write_bytes(SDEF_MAGIC)?;
        match self {
            Self::Inline => {
                writer.write_u32(0)?;
                writer.write_i32(0)
            }
            Self::Legacy { version } => {
                writer.write_u32(0)?;
                writer.write_i32(*version)?;
                writer.write_u8(0)
            }
            Self::Extended { flag, blob } => {
                writer.write_u32(*flag)?;
                writer.write_u32(blob.len() as u32)?;
                writer.write_bytes(blob)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_vec(format: &SdefFormat) -> Vec<u8> {
        let mut out = Vec::new();
        let mut writer = BinaryWriter::new(&mut out);
        format.write(&mut writer).unwrap();
        out
    }

    fn parse_fully(bytes: &[u8]) -> SdefFormat {
        let mut reader = BinaryReader::new(bytes);
        let format = SdefFormat::parse(&mut reader).unwrap();
        assert!(reader.is_empty());
        format
    }

    #[test]
    fn test_header_round_trips() {
        let formats = [
            SdefFormat::Inline,
            SdefFormat::Legacy { version: 1 },
            SdefFormat::Extended {
                flag: 1,
                blob: vec![0xAA, 0xBB, 0xCC],
            },
        ];

        for format in formats {
            let bytes = write_to_vec(&format);
            assert_eq!(parse_fully(&bytes), format);
        }
    }

    #[test]
    fn test_header_layouts() {
        assert_eq!(
            write_to_vec(&SdefFormat::Inline),
            b"SDEF\0\0\0\0\0\0\0\0".to_vec()
        );
        assert_eq!(
            write_to_vec(&SdefFormat::Legacy { version: 1 }),
            b"SDEF\0\0\0\0\x01\0\0\0\0".to_vec()
        );
    }

    #[test]
    fn test_legacy_accepts_nonzero_reserved_pointer() {
        // The first word is a runtime pointer slot in legacy files; only
        // zero has been observed on disk but the reader treats zero as the
        // layout selector, so the header must be exactly that.
        let mut bytes = b"SDEF".to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&3i32.to_le_bytes()); // any version >= 1
        bytes.push(0xFF); // reserved byte, content ignored
        assert_eq!(parse_fully(&bytes), SdefFormat::Legacy { version: 3 });
    }

    #[test]
    fn test_legacy_version_word_round_trips() {
        let mut bytes = b"SDEF".to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&3i32.to_le_bytes());
        bytes.push(0);

        let format = parse_fully(&bytes);
        assert_eq!(format, SdefFormat::Legacy { version: 3 });
        assert_eq!(write_to_vec(&format), bytes);
    }

    #[test]
    fn test_bad_magic() {
        let mut reader = BinaryReader::new(b"FEDS\0\0\0\0");
        let err = SdefFormat::parse(&mut reader).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { actual } if &actual == b"FEDS"));
    }

    #[test]
    fn test_truncated_blob() {
        let mut bytes = b"SDEF".to_vec();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&16u32.to_le_bytes()); // declares 16, has 0
        let mut reader = BinaryReader::new(&bytes);
        assert!(SdefFormat::parse(&mut reader).is_err());
    }
}
