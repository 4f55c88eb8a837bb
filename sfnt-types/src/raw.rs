//! types for working with raw big-endian bytes

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes.
///
/// You do not need to implement this trait directly; it is an implementation
/// detail of the [`BigEndian`] wrapper.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + bytemuck::AnyBitPattern;

    /// The size of the raw type. Essentially an alias for `std::mem::size_of`.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Create an instance of this type from raw big-endian bytes.
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes.
    fn to_raw(self) -> Self::Raw;

    /// Decode an instance from the first [`RAW_BYTE_LEN`] bytes of `bytes`.
    ///
    /// Returns `None` if `bytes` is too short.
    ///
    /// [`RAW_BYTE_LEN`]: Self::RAW_BYTE_LEN
    fn read(bytes: &[u8]) -> Option<Self>;
}

/// A trait for types of known, fixed size.
pub trait FixedSize: Sized {
    /// The raw size of this type, in bytes.
    const RAW_BYTE_LEN: usize;
}

/// A wrapper around raw big-endian bytes for some type.
#[repr(transparent)]
pub struct BigEndian<T: Scalar>(T::Raw);

impl<T: Scalar> BigEndian<T> {
    /// Construct a new `BigEndian` wrapper from a value.
    pub fn new(value: T) -> Self {
        BigEndian(value.to_raw())
    }

    /// Read a copy of this type from raw bytes.
    pub fn get(self) -> T {
        T::from_raw(self.0)
    }

    /// Set the value, overwriting the bytes.
    pub fn set(&mut self, value: T) {
        self.0 = value.to_raw();
    }

    /// The raw big-endian bytes.
    pub fn be_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: Scalar> Clone for BigEndian<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for BigEndian<T> {}

// SAFETY: `BigEndian<T>` is a transparent wrapper around a plain byte array
// (`T::Raw` is itself `AnyBitPattern`).
unsafe impl<T: Scalar + 'static> bytemuck::Zeroable for BigEndian<T> {}

// SAFETY: as above; any bytes are a valid raw value.
unsafe impl<T: Scalar + 'static> bytemuck::AnyBitPattern for BigEndian<T> {}

impl<T: Scalar> FixedSize for BigEndian<T> {
    const RAW_BYTE_LEN: usize = T::RAW_BYTE_LEN;
}

impl<T: Scalar> From<T> for BigEndian<T> {
    fn from(value: T) -> Self {
        BigEndian(value.to_raw())
    }
}

impl<T: Scalar> PartialEq for BigEndian<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl<T: Scalar> Eq for BigEndian<T> {}

impl<T: std::fmt::Debug + Scalar + Copy> std::fmt::Debug for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: std::fmt::Display + Scalar + Copy> std::fmt::Display for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

/// An internal macro for implementing [`Scalar`] for newtypes over scalars.
#[macro_export]
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl $crate::Scalar for $name {
            type Raw = $raw;

            fn to_raw(self) -> $raw {
                self.0.to_raw()
            }

            fn from_raw(raw: $raw) -> Self {
                Self($crate::Scalar::from_raw(raw))
            }

            fn read(bytes: &[u8]) -> Option<Self> {
                Some(Self($crate::Scalar::read(bytes)?))
            }
        }
    };
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;

            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }

            fn read(bytes: &[u8]) -> Option<Self> {
                bytes
                    .get(..Self::RAW_BYTE_LEN)
                    .and_then(|bytes| bytes.try_into().ok())
                    .map(Self::from_be_bytes)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
int_scalar!(i64, [u8; 8]);
