//! The decoded parameter tree.
//!
//! Nodes live in a flat arena inside [`StandardDefinition`], in the exact
//! order they were created during the decode traversal (parents before
//! children, array containers before their elements). The encode path
//! relies on that order, combined with each node's depth, to reconstruct
//! the schema. Children reference each other by [`NodeId`].

use crate::format::SdefFormat;
use crate::variant::Variant;
use crate::{Error, Result};

/// Index of a node within a definition's arena.
pub type NodeId = usize;

/// One node of the decoded parameter tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Field name from the schema (`[i]` for array elements).
    pub name: String,
    /// 1-based nesting depth at which the node was instantiated (the
    /// root's direct children are depth 1). Only used to order schema
    /// reconstruction on save.
    pub depth: u32,
    pub kind: ParameterKind,
}

/// The four shapes a parameter can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    /// A single primitive value.
    RawValue(Variant),
    /// An array of primitive values.
    RawValueArray(Vec<Variant>),
    /// An instance of a named category.
    CustomType {
        type_name: String,
        children: Vec<NodeId>,
    },
    /// An array of instances of a named category. Elements are
    /// `CustomType` nodes.
    CustomTypeArray {
        type_name: String,
        elements: Vec<NodeId>,
    },
}

impl Parameter {
    /// The custom type name, if this node is a custom type or an array of one.
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            ParameterKind::CustomType { type_name, .. }
            | ParameterKind::CustomTypeArray { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    /// The value held by a `RawValue` node.
    pub fn value(&self) -> Option<&Variant> {
        match &self.kind {
            ParameterKind::RawValue(value) => Some(value),
            _ => None,
        }
    }

    /// Mutable access to the value held by a `RawValue` node.
    pub fn value_mut(&mut self) -> Option<&mut Variant> {
        match &mut self.kind {
            ParameterKind::RawValue(value) => Some(value),
            _ => None,
        }
    }

    /// The values held by a `RawValueArray` node.
    pub fn values(&self) -> Option<&[Variant]> {
        match &self.kind {
            ParameterKind::RawValueArray(values) => Some(values),
            _ => None,
        }
    }

    /// Mutable access to the values held by a `RawValueArray` node.
    pub fn values_mut(&mut self) -> Option<&mut Vec<Variant>> {
        match &mut self.kind {
            ParameterKind::RawValueArray(values) => Some(values),
            _ => None,
        }
    }

    /// Display label for this node, computed on demand from its current
    /// state.
    pub fn label(&self) -> String {
        match &self.kind {
            ParameterKind::RawValue(value) => format!("{}: {}", self.name, value),
            ParameterKind::RawValueArray(values) => format!("{}[{}]", self.name, values.len()),
            ParameterKind::CustomType { .. } => self.name.clone(),
            ParameterKind::CustomTypeArray { elements, .. } => {
                format!("{}[{}]", self.name, elements.len())
            }
        }
    }
}

/// A fully decoded SDEF file: the sub-format, the node arena, and the root.
///
/// The arena order is the decode traversal order. Callers may freely edit
/// leaf values and array contents through [`node_mut`](Self::node_mut)
/// between a decode and a later encode; node kinds never change.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardDefinition {
    pub(crate) format: SdefFormat,
    pub(crate) nodes: Vec<Parameter>,
    pub(crate) root: NodeId,
}

impl StandardDefinition {
    /// Create a definition holding only a root node of the given category
    /// type, ready to be populated with [`push_child`](Self::push_child).
    pub fn new(format: SdefFormat, root_type: &str) -> Self {
        let root = Parameter {
            name: root_type.to_owned(),
            depth: 0,
            kind: ParameterKind::CustomType {
                type_name: root_type.to_owned(),
                children: Vec::new(),
            },
        };
        Self {
            format,
            nodes: vec![root],
            root: 0,
        }
    }

    /// The sub-format this definition was decoded from (or will encode to).
    pub fn format(&self) -> &SdefFormat {
        &self.format
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root node.
    pub fn root(&self) -> &Parameter {
        &self.nodes[self.root]
    }

    /// All nodes, in creation (traversal) order.
    pub fn nodes(&self) -> &[Parameter] {
        &self.nodes
    }

    /// Access a node by id.
    pub fn node(&self, id: NodeId) -> &Parameter {
        &self.nodes[id]
    }

    /// Mutable access to a node by id.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Parameter {
        &mut self.nodes[id]
    }

    /// Ids of a node's children (or array elements). Empty for leaves.
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id].kind {
            ParameterKind::CustomType { children, .. } => children,
            ParameterKind::CustomTypeArray { elements, .. } => elements,
            _ => &[],
        }
    }

    /// Find a direct child of `id` by name.
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_ids(id)
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name == name)
    }

    /// Append a new node under `parent` and return its id.
    ///
    /// The node's depth is derived from the parent: entries of a custom
    /// type sit one level deeper, while elements of a custom type array
    /// share the container's depth (their own children then sit one level
    /// deeper). Array elements must be `CustomType` nodes.
    pub fn push_child(&mut self, parent: NodeId, name: &str, kind: ParameterKind) -> Result<NodeId> {
        let depth = match &self.nodes[parent].kind {
            ParameterKind::CustomType { .. } => self.nodes[parent].depth + 1,
            ParameterKind::CustomTypeArray { .. } => {
                if !matches!(kind, ParameterKind::CustomType { .. }) {
                    return Err(Error::InvalidElement { parent });
                }
                self.nodes[parent].depth
            }
            _ => return Err(Error::InvalidParent(parent)),
        };

        let id = self.nodes.len();
        self.nodes.push(Parameter {
            name: name.to_owned(),
            depth,
            kind,
        });
        match &mut self.nodes[parent].kind {
            ParameterKind::CustomType { children, .. } => children.push(id),
            ParameterKind::CustomTypeArray { elements, .. } => elements.push(id),
            _ => unreachable!("parent kind checked above"),
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(type_name: &str) -> ParameterKind {
        ParameterKind::CustomType {
            type_name: type_name.to_owned(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_depth_derivation() {
        let mut def = StandardDefinition::new(SdefFormat::Legacy { version: 1 }, "Engine");
        assert_eq!(def.root().depth, 0);

        let power = def
            .push_child(def.root_id(), "power", ParameterKind::RawValue(Variant::Int32(300)))
            .unwrap();
        assert_eq!(def.node(power).depth, 1);

        let turbos = def
            .push_child(
                def.root_id(),
                "turbos",
                ParameterKind::CustomTypeArray {
                    type_name: "Turbo".to_owned(),
                    elements: Vec::new(),
                },
            )
            .unwrap();
        let element = def.push_child(turbos, "[0]", custom("Turbo")).unwrap();
        let boost = def
            .push_child(element, "boost", ParameterKind::RawValue(Variant::Float32(0.8)))
            .unwrap();

        // Elements share the container's depth; their children go one deeper.
        assert_eq!(def.node(turbos).depth, 1);
        assert_eq!(def.node(element).depth, 1);
        assert_eq!(def.node(boost).depth, 2);
    }

    #[test]
    fn test_leaf_cannot_hold_children() {
        let mut def = StandardDefinition::new(SdefFormat::Legacy { version: 1 }, "Engine");
        let power = def
            .push_child(def.root_id(), "power", ParameterKind::RawValue(Variant::Int32(1)))
            .unwrap();

        let err = def
            .push_child(power, "x", ParameterKind::RawValue(Variant::Int32(2)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParent(id) if id == power));
    }

    #[test]
    fn test_array_elements_must_be_custom_types() {
        let mut def = StandardDefinition::new(SdefFormat::Legacy { version: 1 }, "Engine");
        let turbos = def
            .push_child(
                def.root_id(),
                "turbos",
                ParameterKind::CustomTypeArray {
                    type_name: "Turbo".to_owned(),
                    elements: Vec::new(),
                },
            )
            .unwrap();

        let err = def
            .push_child(turbos, "[0]", ParameterKind::RawValue(Variant::Int32(1)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidElement { parent } if parent == turbos));
    }

    #[test]
    fn test_child_lookup_and_labels() {
        let mut def = StandardDefinition::new(SdefFormat::Legacy { version: 1 }, "Engine");
        let power = def
            .push_child(def.root_id(), "power", ParameterKind::RawValue(Variant::Int32(450)))
            .unwrap();

        assert_eq!(def.child_by_name(def.root_id(), "power"), Some(power));
        assert_eq!(def.child_by_name(def.root_id(), "missing"), None);
        assert_eq!(def.node(power).label(), "power: 450");
    }

    #[test]
    fn test_editing_leaf_values() {
        let mut def = StandardDefinition::new(SdefFormat::Legacy { version: 1 }, "Engine");
        let power = def
            .push_child(def.root_id(), "power", ParameterKind::RawValue(Variant::Int32(450)))
            .unwrap();

        if let Some(value) = def.node_mut(power).value_mut() {
            *value = Variant::Int32(500);
        }
        assert_eq!(def.node(power).value(), Some(&Variant::Int32(500)));
    }
}
