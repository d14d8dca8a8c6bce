//! Schema model: the category table embedded in every SDEF file.
//!
//! A schema is a list of categories, each a named sequence of typed
//! entries. An entry is a primitive value, an instance of another category,
//! or an array of either. The instance tree that follows the schema in the
//! file is shaped entirely by this table.

use sdef_common::BinaryReader;

use crate::types::ARRAY_SENTINEL;
use crate::{Error, Result};

/// One named, reusable type definition within a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// One field of a category.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

/// The type of an entry.
///
/// Value type codes are kept as raw wire values here; they are validated
/// when the data stream is decoded so that an unknown code fails with the
/// data offset, not the schema offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A primitive value with the given type code.
    Value(u16),
    /// An array of primitives or of category instances. `fixed_len` is
    /// only meaningful when the sub-format stores lengths in the schema;
    /// the inline sub-format writes it as zero and reads the actual length
    /// from the data stream.
    Array { element: ArrayElement, fixed_len: u32 },
    /// An instance of the category at the given index.
    Custom(u16),
}

/// Element type of an array entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayElement {
    /// Primitive elements with the given type code.
    Value(u16),
    /// Instances of the category at the given index.
    Custom(u16),
}

/// A parsed category table plus the master type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub categories: Vec<Category>,
    /// Index of the category that shapes the root of the instance tree.
    pub master_index: u16,
    pub master_is_custom: bool,
}

impl Schema {
    /// Parse the category table and master reference. The reader must be
    /// positioned just past the header.
    pub fn parse(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let category_count = read_count(reader)?;

        let mut categories = Vec::new();
        for _ in 0..category_count {
            let name = read_name(reader)?;
            let entry_count = read_count(reader)?;

            let mut entries = Vec::new();
            for _ in 0..entry_count {
                let entry_name = read_name(reader)?;
                let type_or_index = reader.read_u16()?;
                let has_custom_type = read_word_bool(reader)?;

                let kind = if has_custom_type {
                    EntryKind::Custom(type_or_index)
                } else if type_or_index == ARRAY_SENTINEL {
                    let element_or_tag = reader.read_u16()?;
                    let element_has_custom_type = read_word_bool(reader)?;
                    let fixed_len = reader.read_u32()?;

                    let element = if element_has_custom_type {
                        ArrayElement::Custom(element_or_tag)
                    } else {
                        ArrayElement::Value(element_or_tag)
                    };
                    EntryKind::Array { element, fixed_len }
                } else {
                    EntryKind::Value(type_or_index)
                };

                entries.push(Entry {
                    name: entry_name,
                    kind,
                });
            }

            categories.push(Category { name, entries });
        }

        let master_index = reader.read_u16()?;
        let master_is_custom = read_word_bool(reader)?;

        Ok(Self {
            categories,
            master_index,
            master_is_custom,
        })
    }

    /// Look up a category by index, bounds-checked.
    pub fn category(&self, index: u16) -> Result<&Category> {
        self.categories
            .get(index as usize)
            .ok_or(Error::InvalidCategoryIndex {
                index,
                count: self.categories.len(),
            })
    }
}

/// Read a non-negative i32 count.
fn read_count(reader: &mut BinaryReader<'_>) -> Result<usize> {
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(Error::InvalidCount(count));
    }
    Ok(count as usize)
}

/// Read a length-prefixed, null-terminated name. The declared length
/// includes the terminator.
fn read_name(reader: &mut BinaryReader<'_>) -> Result<String> {
    let length = reader.read_i32()?;
    if length < 1 {
        return Err(Error::InvalidNameLength(length));
    }
    let name = reader.read_string(length as usize - 1)?.to_owned();
    reader.read_u8()?; // terminator
    Ok(name)
}

/// Read a 2-byte-wide boolean (non-zero = true).
fn read_word_bool(reader: &mut BinaryReader<'_>) -> Result<bool> {
    Ok(reader.read_u16()? != 0)
}
