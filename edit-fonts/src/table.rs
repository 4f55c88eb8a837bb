//! Table headers and shared immutable table data

use std::sync::Arc;

use sfnt_types::Tag;

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{FontWrite, TableWriter},
};

/// Identifies a table's location within a font blob.
///
/// This is one record of the font's table directory: the table's tag, its
/// checksum, and the byte offset and length of its data. A header is created
/// once when a table region is located, and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHeader {
    tag: Tag,
    checksum: u32,
    offset: u32,
    length: u32,
}

impl TableHeader {
    /// The encoded size of a table directory record, in bytes.
    pub const RECORD_LEN: usize = 16;

    /// Construct a new header.
    pub const fn new(tag: Tag, checksum: u32, offset: u32, length: u32) -> Self {
        TableHeader {
            tag,
            checksum,
            offset,
            length,
        }
    }

    /// A header for a table that does not live in a font blob yet.
    ///
    /// The checksum and offset are filled in by the font assembler when the
    /// table is finally written into a font.
    pub const fn of(tag: Tag) -> Self {
        TableHeader::new(tag, 0, 0, 0)
    }

    /// The table's tag.
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// The table's checksum, as recorded in the directory.
    pub const fn checksum(&self) -> u32 {
        self.checksum
    }

    /// The byte offset of the table's data from the start of the font.
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// The byte length of the table's data.
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// A copy of this header with a new length.
    ///
    /// Used when a builder produces fresh bytes for an edited table; the
    /// stale checksum is zeroed, since only the assembler can recompute it.
    pub const fn with_length(&self, length: u32) -> Self {
        TableHeader::new(self.tag, 0, self.offset, length)
    }
}

impl<'a> FontRead<'a> for TableHeader {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(TableHeader {
            tag: data.read_at(0)?,
            checksum: data.read_at(4)?,
            offset: data.read_at(8)?,
            length: data.read_at(12)?,
        })
    }
}

impl FontWrite for TableHeader {
    fn write_into(&self, writer: &mut TableWriter) {
        self.tag.write_into(writer);
        self.checksum.write_into(writer);
        self.offset.write_into(writer);
        self.length.write_into(writer);
    }
}

/// Shared immutable table bytes.
///
/// This is a cheaply clonable handle; the underlying bytes live as long as
/// the longest-lived holder, and are never mutated. Editing always happens
/// by building fresh bytes through a table's builder.
#[derive(Clone)]
pub struct TableData {
    bytes: Arc<[u8]>,
}

impl TableData {
    /// A borrowed view of the bytes, for parsing.
    pub fn font_data(&self) -> FontData<'_> {
        FontData::new(&self.bytes)
    }

    /// The length of the data, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for TableData {
    fn from(src: Vec<u8>) -> Self {
        TableData { bytes: src.into() }
    }
}

impl From<&[u8]> for TableData {
    fn from(src: &[u8]) -> Self {
        TableData { bytes: src.into() }
    }
}

impl PartialEq for TableData {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for TableData {}

impl std::fmt::Debug for TableData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TableData({} bytes)", self.bytes.len())
    }
}

/// Shared behavior of immutable tables.
///
/// A table is a structured, read-only view over a byte range, addressed by
/// its [`TableHeader`]. Concrete tables add typed accessors over the data;
/// none of them expose mutation.
pub trait Table {
    /// The header identifying this table within its font.
    fn header(&self) -> &TableHeader;

    /// The table's backing bytes.
    fn data(&self) -> &TableData;

    /// The length of the table's data, in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// `true` if the table's data is empty.
    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// A trait for types that represent top-level tables, with a known tag.
pub trait TopLevelTable {
    /// The table's tag, as it appears in the font's table directory.
    const TAG: Tag;
}

/// A table carried through an edit as opaque bytes.
///
/// Most tables in a font pass through an editing session unrestructured;
/// this type gives them the base [`Table`] capability without interpreting
/// their contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTable {
    header: TableHeader,
    data: TableData,
}

impl RawTable {
    /// Wrap `data` as an opaque table.
    ///
    /// Fails if the byte range is shorter than the length the header
    /// declares; no deeper validation is performed.
    pub fn read(header: TableHeader, data: TableData) -> Result<Self, ReadError> {
        if data.len() < header.length() as usize {
            return Err(ReadError::OutOfBounds);
        }
        Ok(RawTable { header, data })
    }
}

impl Table for RawTable {
    fn header(&self) -> &TableHeader {
        &self.header
    }

    fn data(&self) -> &TableData {
        &self.data
    }
}

impl FontWrite for RawTable {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(self.data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_record_round_trip() {
        let header = TableHeader::new(Tag::new(b"loca"), 0xdeadbeef, 0x100, 0x42);
        let mut writer = TableWriter::default();
        header.write_into(&mut writer);
        let bytes = writer.into_data();
        assert_eq!(bytes.len(), TableHeader::RECORD_LEN);
        assert_eq!(&bytes[..4], b"loca");
        let reread = TableHeader::read(FontData::new(&bytes)).unwrap();
        assert_eq!(reread, header);
    }

    #[test]
    fn raw_table_checks_declared_length() {
        let data = TableData::from(vec![0u8; 8]);
        let short = TableHeader::new(Tag::new(b"cvt "), 0, 0, 12);
        assert!(matches!(
            RawTable::read(short, data.clone()),
            Err(ReadError::OutOfBounds)
        ));
        let ok = TableHeader::new(Tag::new(b"cvt "), 0, 0, 8);
        assert!(RawTable::read(ok, data).is_ok());
    }

    #[test]
    fn table_data_is_shared() {
        let data = TableData::from(vec![1u8, 2, 3]);
        let clone = data.clone();
        assert_eq!(data, clone);
        assert_eq!(clone.as_bytes(), &[1, 2, 3]);
    }
}
