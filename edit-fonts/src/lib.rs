//! Parsing and editing OpenType font tables.
//!
//! This crate provides the binary table model for a font-editing toolkit:
//! immutable, shareable [tables](Table) parsed from raw font bytes, and
//! mutable [builders](TableBuilder) that lazily bind a structured view to
//! those bytes and serialize edited state back out.
//!
//! The lifecycle every table type shares lives in the [`builder`] module;
//! concrete tables live in [`tables`]. The low-level byte accessors
//! ([`FontData`], [`TableWriter`]) and the table directory
//! ([`TableHeader`]) are the seams to the rest of a font stack: the
//! whole-font directory, checksum, and assembly process are other crates'
//! business.
//!
//! # Example
//!
//! ```
//! use edit_fonts::{TableBuilder, TableData, TableHeader, TopLevelTable};
//! use edit_fonts::tables::loca::{LocaBuilder, LocaFormat, LocaTable};
//! use edit_fonts::types::GlyphId;
//!
//! // two glyphs of 6 and 8 bytes, stored in the short format
//! let raw = TableData::from(vec![0x00, 0x00, 0x00, 0x03, 0x00, 0x07]);
//! let header = TableHeader::new(LocaTable::TAG, 0, 0, raw.len() as u32);
//! let mut builder = LocaBuilder::from_data(header, raw, LocaFormat::Short, 2);
//!
//! // grow the first glyph by two bytes
//! let list = builder.loca_list().unwrap();
//! list[1] += 2;
//! list[2] += 2;
//!
//! let table = builder.build().unwrap();
//! assert_eq!(table.glyph_length(GlyphId::new(0)).unwrap(), 8);
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod builder;
mod error;
mod font_data;
mod read;
mod table;
pub mod tables;
pub mod validate;
mod write;

pub use builder::{BuilderState, RawTableBuilder, TableBuilder};
pub use error::Error;
pub use font_data::FontData;
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table::{RawTable, Table, TableData, TableHeader, TopLevelTable};
pub use validate::Validate;
pub use write::{dump_table, FontWrite, TableWriter};

/// Reexport of the scalar types crate, so that users can access those types
/// without explicitly depending on it.
pub extern crate sfnt_types as types;
