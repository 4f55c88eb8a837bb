//! Scalar types used in sfnt fonts.
//!
//! This crate contains the basic shared types used when interpreting font
//! binary data: table [tags](Tag), [glyph identifiers](GlyphId), and the
//! [`BigEndian`] wrapper used to read raw big-endian values in place.

#![deny(rustdoc::broken_intra_doc_links)]

mod glyph_id;
mod raw;
mod tag;

pub use glyph_id::GlyphId;
pub use raw::{BigEndian, FixedSize, Scalar};
pub use tag::Tag;
