//! Errors that occur while building tables

use crate::{read::ReadError, validate::ValidationReport};

/// An error occurred while building or serializing a table.
#[derive(Debug)]
pub enum Error {
    /// The table's state failed the pre-serialization validation pass.
    ValidationFailed(ValidationReport),
    /// The table's backing bytes could not be interpreted.
    Read(ReadError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ValidationFailed(report) => report.fmt(f),
            Error::Read(error) => error.fmt(f),
        }
    }
}

impl From<ValidationReport> for Error {
    fn from(src: ValidationReport) -> Self {
        Error::ValidationFailed(src)
    }
}

impl From<ReadError> for Error {
    fn from(src: ReadError) -> Self {
        Error::Read(src)
    }
}

impl std::error::Error for Error {}
