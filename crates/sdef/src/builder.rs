//! The encode path: schema reconstruction and serialization.
//!
//! Saving does not keep the schema that was decoded. Instead the category
//! table is rebuilt from the live tree, so that edits such as added or
//! removed array elements are reflected, then the header, table, and
//! instance data are written in one pass. The tree itself is never
//! mutated.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use sdef_common::BinaryWriter;

use crate::tree::{NodeId, ParameterKind, StandardDefinition};
use crate::types::ARRAY_SENTINEL;
use crate::{Error, Result};

impl StandardDefinition {
    /// Encode and write to a file on disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Encode into any writer.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = BinaryWriter::new(sink);
        let categories = self.reconstruct_categories();

        self.format.write(&mut writer)?;

        writer.write_i32(categories.len() as i32)?;
        for &id in &categories {
            self.write_category(&mut writer, &categories, id)?;
        }

        // Master reference: which category the instance tree starts at.
        let root = &self.nodes[self.root];
        let root_type = root
            .type_name()
            .ok_or_else(|| Error::UnresolvedTypeName(root.name.clone()))?;
        writer.write_u16(self.resolve_type(&categories, root_type)?)?;
        writer.write_u16(1)?;

        self.write_data(&mut writer, self.root)?;
        writer.flush()?;
        Ok(())
    }

    /// Rebuild the category list from the live tree: one node per distinct
    /// type name, deepest first, the root appended last. The file
    /// convention defines categories discovered deeper in the tree before
    /// the shallower ones that reference them by index, so this exact
    /// order must be reproduced.
    fn reconstruct_categories(&self) -> Vec<NodeId> {
        let mut candidates: Vec<NodeId> = (0..self.nodes.len())
            .filter(|&id| id != self.root)
            .filter(|&id| {
                matches!(
                    self.nodes[id].kind,
                    ParameterKind::CustomType { .. } | ParameterKind::CustomTypeArray { .. }
                )
            })
            .collect();
        // Stable sort: equal depths keep traversal order.
        candidates.sort_by(|&a, &b| self.nodes[b].depth.cmp(&self.nodes[a].depth));

        let mut list = Vec::new();
        let mut seen = HashSet::new();
        for id in candidates {
            if let Some(name) = self.nodes[id].type_name() {
                if seen.insert(name) {
                    list.push(id);
                }
            }
        }
        list.push(self.root);
        list
    }

    /// Resolve a type name to its index in the reconstructed list (first
    /// match, as the format expects).
    fn resolve_type(&self, categories: &[NodeId], name: &str) -> Result<u16> {
        categories
            .iter()
            .position(|&id| self.nodes[id].type_name() == Some(name))
            .map(|index| index as u16)
            .ok_or_else(|| Error::UnresolvedTypeName(name.to_owned()))
    }

    /// Write one category definition derived from a representative node.
    /// For array-typed categories the representative shape is the first
    /// element's children.
    fn write_category<W: Write>(
        &self,
        writer: &mut BinaryWriter<W>,
        categories: &[NodeId],
        id: NodeId,
    ) -> Result<()> {
        let node = &self.nodes[id];
        let (type_name, representative) = match &node.kind {
            ParameterKind::CustomType {
                type_name,
                children,
            } => (type_name, children),
            ParameterKind::CustomTypeArray {
                type_name,
                elements,
            } => {
                let first = *elements
                    .first()
                    .ok_or_else(|| Error::EmptyCustomTypeArray(type_name.clone()))?;
                match &self.nodes[first].kind {
                    ParameterKind::CustomType { children, .. } => (type_name, children),
                    _ => return Err(Error::InvalidElement { parent: id }),
                }
            }
            _ => return Err(Error::UnresolvedTypeName(node.name.clone())),
        };

        writer.write_i32(type_name.len() as i32 + 1)?;
        writer.write_cstr(type_name)?;

        writer.write_i32(representative.len() as i32)?;
        for &child in representative {
            self.write_entry(writer, categories, child)?;
        }
        Ok(())
    }

    /// Write one entry record for a child of a representative instance.
    fn write_entry<W: Write>(
        &self,
        writer: &mut BinaryWriter<W>,
        categories: &[NodeId],
        id: NodeId,
    ) -> Result<()> {
        let node = &self.nodes[id];
        writer.write_i32(node.name.len() as i32 + 1)?;
        writer.write_cstr(&node.name)?;

        match &node.kind {
            ParameterKind::RawValue(value) => {
                writer.write_u16(value.tag() as u16)?;
                writer.write_u16(0)?;
            }
            ParameterKind::CustomType { type_name, .. } => {
                writer.write_u16(self.resolve_type(categories, type_name)?)?;
                writer.write_u16(1)?;
            }
            ParameterKind::RawValueArray(values) => {
                let first = values
                    .first()
                    .ok_or_else(|| Error::EmptyRawValueArray(node.name.clone()))?;
                writer.write_u16(ARRAY_SENTINEL)?;
                writer.write_u16(0)?;
                writer.write_u16(first.tag() as u16)?;
                writer.write_u16(0)?;
                writer.write_u32(self.written_length(values.len()))?;
            }
            ParameterKind::CustomTypeArray {
                type_name,
                elements,
            } => {
                writer.write_u16(ARRAY_SENTINEL)?;
                writer.write_u16(0)?;
                writer.write_u16(self.resolve_type(categories, type_name)?)?;
                writer.write_u16(1)?;
                writer.write_u32(self.written_length(elements.len()))?;
            }
        }
        Ok(())
    }

    /// The array length recorded in the schema: zero when the sub-format
    /// stores lengths inline in the data stream.
    fn written_length(&self, length: usize) -> u32 {
        if self.format.lengths_inline() {
            0
        } else {
            length as u32
        }
    }

    /// Serialize the instance data below a custom type node, in the same
    /// preorder used at decode.
    fn write_data<W: Write>(&self, writer: &mut BinaryWriter<W>, id: NodeId) -> Result<()> {
        let ParameterKind::CustomType { children, .. } = &self.nodes[id].kind else {
            return Ok(());
        };
        for &child in children {
            match &self.nodes[child].kind {
                ParameterKind::CustomType { .. } => self.write_data(writer, child)?,
                ParameterKind::RawValue(value) => value.encode(writer)?,
                ParameterKind::RawValueArray(values) => {
                    if self.format.lengths_inline() {
                        writer.write_u32(values.len() as u32)?;
                    }
                    for value in values {
                        value.encode(writer)?;
                    }
                }
                ParameterKind::CustomTypeArray { elements, .. } => {
                    if self.format.lengths_inline() {
                        writer.write_u32(elements.len() as u32)?;
                    }
                    for &element in elements {
                        self.write_data(writer, element)?;
                    }
                }
            }
        }
        Ok(())
    }
}
