//! The decode path: header, schema, then a schema-driven tree walk.
//!
//! Decoding reads the whole file into memory up front, parses the header
//! and category table, and then expands the master category recursively.
//! The schema alone decides the shape of the traversal; the data stream
//! only supplies leaf values and, for the inline sub-format, array counts.

use std::path::Path;

use sdef_common::BinaryReader;

use crate::format::SdefFormat;
use crate::schema::{ArrayElement, Category, EntryKind, Schema};
use crate::tree::{NodeId, ParameterKind, StandardDefinition};
use crate::variant::Variant;
use crate::{Error, Result};

/// Maximum category expansion depth before a cyclic schema is rejected.
///
/// The schema graph may legitimately be cyclic, but only through arrays
/// whose element counts bound the recursion. A direct custom-type cycle
/// consumes no data bytes and would otherwise never terminate.
const MAX_DEPTH: u32 = 512;

impl StandardDefinition {
    /// Read and decode an SDEF file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode an SDEF file from bytes.
    ///
    /// The sub-format is detected from the header. The input must be
    /// exactly consumed: trailing bytes after the instance tree are
    /// treated as corruption.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let format = SdefFormat::parse(&mut reader)?;
        let schema = Schema::parse(&mut reader)?;
        let master = schema.category(schema.master_index)?;

        let inline = format.lengths_inline();
        let legacy = format.is_legacy();
        let mut def = StandardDefinition::new(format, &master.name);

        let mut walk = TreeWalk {
            schema: &schema,
            def: &mut def,
            inline,
            legacy,
        };
        let root = walk.def.root_id();
        walk.expand(&mut reader, root, master, 1)?;

        if !reader.is_empty() {
            return Err(Error::TrailingData {
                remaining: reader.remaining(),
            });
        }
        Ok(def)
    }
}

/// State for one decode traversal.
struct TreeWalk<'a, 'b> {
    schema: &'a Schema,
    def: &'b mut StandardDefinition,
    inline: bool,
    legacy: bool,
}

impl<'a> TreeWalk<'a, '_> {
    /// Instantiate every entry of `category` under `parent`, reading leaf
    /// values from the stream in declaration order.
    fn expand(
        &mut self,
        reader: &mut BinaryReader<'_>,
        parent: NodeId,
        category: &'a Category,
        depth: u32,
    ) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(Error::RecursionLimit(MAX_DEPTH));
        }

        for entry in &category.entries {
            match entry.kind {
                EntryKind::Custom(index) => {
                    let target = self.schema.category(index)?;
                    let node = self.def.push_child(
                        parent,
                        &entry.name,
                        ParameterKind::CustomType {
                            type_name: target.name.clone(),
                            children: Vec::new(),
                        },
                    )?;
                    self.expand(reader, node, target, depth + 1)?;
                }
                EntryKind::Array {
                    element: ArrayElement::Custom(index),
                    fixed_len,
                } => {
                    let target = self.schema.category(index)?;
                    let length = self.array_len(reader, fixed_len)?;
                    let node = self.def.push_child(
                        parent,
                        &entry.name,
                        ParameterKind::CustomTypeArray {
                            type_name: target.name.clone(),
                            elements: Vec::new(),
                        },
                    )?;
                    for i in 0..length {
                        let element = self.def.push_child(
                            node,
                            &format!("[{i}]"),
                            ParameterKind::CustomType {
                                type_name: target.name.clone(),
                                children: Vec::new(),
                            },
                        )?;
                        self.expand(reader, element, target, depth + 1)?;
                    }
                }
                EntryKind::Array {
                    element: ArrayElement::Value(tag),
                    fixed_len,
                } => {
                    let length = self.array_len(reader, fixed_len)?;
                    let mut values = Vec::new();
                    for _ in 0..length {
                        values.push(Variant::decode(tag, reader, self.legacy)?);
                    }
                    self.def
                        .push_child(parent, &entry.name, ParameterKind::RawValueArray(values))?;
                }
                EntryKind::Value(tag) => {
                    let value = Variant::decode(tag, reader, self.legacy)?;
                    self.def
                        .push_child(parent, &entry.name, ParameterKind::RawValue(value))?;
                }
            }
        }
        Ok(())
    }

    /// Resolve an array length: from the schema, or from the data stream
    /// under the inline sub-format.
    fn array_len(&self, reader: &mut BinaryReader<'_>, fixed_len: u32) -> Result<usize> {
        if self.inline {
            Ok(reader.read_u32()? as usize)
        } else {
            Ok(fixed_len as usize)
        }
    }
}
