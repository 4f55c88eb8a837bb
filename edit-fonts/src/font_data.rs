//! raw font bytes

use std::ops::{Range, RangeBounds};

use sfnt_types::Scalar;

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// You generally don't need to do this; data is sliced out of a larger
    /// blob for you when a table is located, but it may be useful in tests.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the data beginning at `pos`, or `None` if out of bounds.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    /// Returns the data in the given range, or `None` if out of bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Read a scalar value out of the buffer at `offset`.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Interpret the bytes in `range` as a slice of some raw type `T`.
    ///
    /// This is zero-copy; `T` is generally [`BigEndian<_>`] or another
    /// unaligned byte-array wrapper.
    ///
    /// [`BigEndian<_>`]: sfnt_types::BigEndian
    pub fn read_array<T: bytemuck::AnyBitPattern>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    /// The raw underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_types::{BigEndian, Tag};

    #[test]
    fn read_scalars() {
        let data = FontData::new(&[0x00, 0x02, 0xff, 0xff, b'l', b'o', b'c', b'a']);
        assert_eq!(data.read_at::<u16>(0).unwrap(), 2);
        assert_eq!(data.read_at::<u32>(0).unwrap(), 0x0002ffff);
        assert_eq!(data.read_at::<Tag>(4).unwrap(), Tag::new(b"loca"));
        assert!(matches!(
            data.read_at::<u32>(6),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn read_array_exact() {
        let data = FontData::new(&[0, 1, 0, 2, 0, 3]);
        let array: &[BigEndian<u16>] = data.read_array(0..6).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[2].get(), 3);
    }

    #[test]
    fn read_array_bad_len() {
        let data = FontData::new(&[0, 1, 0]);
        assert!(matches!(
            data.read_array::<BigEndian<u16>>(0..3),
            Err(ReadError::InvalidArrayLen)
        ));
        assert!(matches!(
            data.read_array::<BigEndian<u16>>(0..4),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn slicing() {
        let data = FontData::new(&[1, 2, 3, 4]);
        assert_eq!(data.slice(1..3).unwrap().as_bytes(), &[2, 3]);
        assert_eq!(data.split_off(2).unwrap().as_bytes(), &[3, 4]);
        assert!(data.slice(2..5).is_none());
    }
}
