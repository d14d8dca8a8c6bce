//! SDEF binary definition file codec for Gran Turismo.
//!
//! SDEF (`.sdef` files) is the self-describing binary format the game uses
//! for typed, tree-shaped configuration data such as car physics setups.
//! Each file carries its own schema (a table of named categories) followed
//! by one instance tree shaped by that schema. This crate decodes the file
//! into an editable parameter tree and encodes trees back to bytes.
//!
//! # Quick Start
//!
//! ```no_run
//! use sdef::StandardDefinition;
//!
//! // Load a definition file
//! let def = StandardDefinition::open("engine.sdef")?;
//!
//! // Walk the tree
//! println!("root: {}", def.root().name);
//! for &child in def.child_ids(def.root_id()) {
//!     println!("  {}", def.node(child).label());
//! }
//! # Ok::<(), sdef::Error>(())
//! ```
//!
//! # Editing and Saving
//!
//! Leaf values can be edited in place, then the whole tree re-encoded. The
//! schema is not kept from the decode; it is rebuilt from the live tree on
//! save, so structural edits (such as added array elements) are reflected:
//!
//! ```no_run
//! use sdef::{StandardDefinition, Variant};
//!
//! let mut def = StandardDefinition::open("engine.sdef")?;
//!
//! let power = def.child_by_name(def.root_id(), "power").unwrap();
//! if let Some(value) = def.node_mut(power).value_mut() {
//!     *value = Variant::Int32(500);
//! }
//!
//! def.save("engine_tuned.sdef")?;
//! # Ok::<(), sdef::Error>(())
//! ```
//!
//! # Sub-formats
//!
//! Three header layouts exist in the wild, detected automatically and
//! reported by [`StandardDefinition::format`]. They differ in where array
//! lengths are stored (in the schema or inline in the data stream) and in
//! which value types decode; see [`SdefFormat`].
//!
//! # Architecture
//!
//! - [`StandardDefinition`]: the decoded file, an arena of [`Parameter`]
//!   nodes plus the sub-format
//! - [`Schema`] / [`Category`]: the category table read from the file
//! - [`Variant`]: one typed leaf value
//! - [`SdefFormat`]: the detected sub-format header

mod builder;
mod error;
mod format;
mod parser;
mod schema;
mod tree;
mod types;
mod variant;

pub use error::{Error, Result};
pub use format::{SdefFormat, SDEF_MAGIC};
pub use schema::{ArrayElement, Category, Entry, EntryKind, Schema};
pub use tree::{NodeId, Parameter, ParameterKind, StandardDefinition};
pub use types::{ValueTag, ARRAY_SENTINEL};
pub use variant::Variant;
