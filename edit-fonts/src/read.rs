//! Traits for interpreting font data

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all types that are self-describing: that is,
/// types that do not require any external state in order to interpret their
/// underlying bytes. (Types that require external state implement
/// [`FontReadWithArgs`] instead.)
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for a type that needs additional arguments to be read.
pub trait ReadArgs {
    /// The arguments required to read this type.
    ///
    /// If a type requires multiple arguments, they are passed as a tuple.
    type Args: Copy;
}

/// A trait for types that require external data in order to be constructed.
///
/// The canonical example is the loca table, whose byte format alone does not
/// record either its glyph count or its offset width; both must be supplied
/// from other tables.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    /// read an item, using the provided args.
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// An index or byte range was out of bounds.
    OutOfBounds,
    /// A format field held a value we don't know how to interpret.
    // i64 is flexible enough to store any value we might encounter
    InvalidFormat(i64),
    /// A byte range was not a whole number of array items.
    InvalidArrayLen,
    /// The data was structurally unsound.
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An index or offset was out of bounds"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

impl std::error::Error for ReadError {}
