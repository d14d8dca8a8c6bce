//! Common utilities for the SDEF codec.
//!
//! This crate provides the foundational binary I/O types shared by the
//! decode and encode paths:
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from a byte slice
//! - [`BinaryWriter`] - Little-endian writing into any [`std::io::Write`] sink

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
