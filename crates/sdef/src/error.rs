//! Error types for SDEF decoding and encoding.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors that can occur when working with SDEF files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (truncated stream, malformed strings).
    #[error("{0}")]
    Common(#[from] sdef_common::Error),

    /// The file does not start with the SDEF magic.
    #[error("not an SDEF file (magic {actual:?})")]
    FormatMismatch { actual: [u8; 4] },

    /// A category index points outside the category table.
    #[error("invalid category index: {index} (table size: {count})")]
    InvalidCategoryIndex { index: u16, count: usize },

    /// A length-prefixed name declared a length below 1.
    #[error("invalid name length: {0}")]
    InvalidNameLength(i32),

    /// A negative category or entry count.
    #[error("invalid count: {0}")]
    InvalidCount(i32),

    /// An entry carries a type code with no decode rule.
    #[error("unsupported type code {tag} at offset {offset:#x}")]
    UnsupportedType { tag: u16, offset: usize },

    /// Bytes were left over after the instance tree was fully decoded.
    #[error("{remaining} trailing bytes after the instance tree")]
    TrailingData { remaining: usize },

    /// Category expansion never reached leaf values.
    #[error("category expansion exceeded depth limit {0}; the schema is likely cyclic")]
    RecursionLimit(u32),

    /// Attempted to attach a child to a leaf node.
    #[error("node {0} cannot hold children")]
    InvalidParent(NodeId),

    /// A custom type array element is not a custom type node.
    #[error("array element under node {parent} is not a custom type node")]
    InvalidElement { parent: NodeId },

    /// The tree references a type name absent from the reconstructed schema.
    #[error("type name {0:?} is missing from the reconstructed schema")]
    UnresolvedTypeName(String),

    /// No representative element to derive a category shape from.
    #[error("custom type array of {0:?} is empty; cannot derive its shape")]
    EmptyCustomTypeArray(String),

    /// No representative value to derive an element type from.
    #[error("raw value array {0:?} is empty; cannot derive its element type")]
    EmptyRawValueArray(String),
}

/// Result type for SDEF operations.
pub type Result<T> = std::result::Result<T, Error>;
