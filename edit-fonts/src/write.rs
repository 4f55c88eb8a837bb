//! Serializing tables into big-endian bytes

use sfnt_types::{BigEndian, GlyphId, Scalar, Tag};

use crate::validate::{Validate, ValidationReport};

/// A type that can be written out as part of a font file.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// An append-only sink for serialized table data.
///
/// The caller is responsible for ensuring everything written is in
/// big-endian order; the [`FontWrite`] impls on the scalar types take care
/// of this for you.
#[derive(Debug, Default)]
pub struct TableWriter {
    data: Vec<u8>,
}

/// Attempt to serialize a table.
///
/// If the table is malformed, this will return an Err([`ValidationReport`]),
/// otherwise it will return the bytes encoding the table.
pub fn dump_table<T: FontWrite + Validate>(table: &T) -> Result<Vec<u8>, ValidationReport> {
    table.validate()?;
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    Ok(writer.into_data())
}

impl TableWriter {
    /// Write raw bytes into this table.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// The number of bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.data.len()
    }

    /// Finish writing, returning the serialized bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(i64);
write_be_bytes!(Tag);
write_be_bytes!(GlyphId);

impl<T: Scalar> FontWrite for BigEndian<T> {
    #[inline]
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(self.be_bytes())
    }
}

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_big_endian() {
        let mut writer = TableWriter::default();
        0x0102u16.write_into(&mut writer);
        (-2i16).write_into(&mut writer);
        Tag::new(b"glyf").write_into(&mut writer);
        assert_eq!(writer.bytes_written(), 8);
        assert_eq!(
            writer.into_data(),
            [0x01, 0x02, 0xff, 0xfe, b'g', b'l', b'y', b'f']
        );
    }

    #[test]
    fn slices_write_in_order() {
        let mut writer = TableWriter::default();
        [1u16, 2, 3].write_into(&mut writer);
        assert_eq!(writer.into_data(), [0, 1, 0, 2, 0, 3]);
    }
}
