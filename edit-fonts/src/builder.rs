//! the table builder lifecycle
//!
//! Every concrete table builder implements the same small protocol, which
//! defines a state machine over the two-way binding between a table's raw
//! bytes and its edited structured view: raw bytes are parsed lazily into
//! structured state on first access, edits to that state make the raw bytes
//! stale, and serialization produces fresh bytes for a new immutable table.

use crate::{
    error::Error,
    table::{RawTable, Table, TableData, TableHeader},
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// The structured state staged inside a builder.
///
/// This is deliberately an explicit tag rather than a nullable cache field,
/// so that the builder's position in the lifecycle is directly observable
/// and testable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuilderState<T> {
    /// No structured view has been derived; the backing raw bytes (if any)
    /// are authoritative.
    Unparsed,
    /// A structured view has been materialized; the backing raw bytes are
    /// stale and are ignored until the builder is reverted or reset.
    Parsed(T),
}

impl<T> BuilderState<T> {
    /// `true` if structured state has been materialized.
    pub fn is_parsed(&self) -> bool {
        matches!(self, BuilderState::Parsed(_))
    }

    /// The structured state, if materialized.
    pub fn parsed(&self) -> Option<&T> {
        match self {
            BuilderState::Parsed(value) => Some(value),
            BuilderState::Unparsed => None,
        }
    }

    /// The structured state, if materialized, mutably.
    pub fn parsed_mut(&mut self) -> Option<&mut T> {
        match self {
            BuilderState::Parsed(value) => Some(value),
            BuilderState::Unparsed => None,
        }
    }
}

/// The lifecycle shared by every table builder.
///
/// Implementors also carry [`FontWrite`] (how the structured state is
/// encoded) and [`Validate`] (whether the state may be encoded at all);
/// the provided [`serialize`][Self::serialize] method ties the three
/// together.
pub trait TableBuilder: FontWrite + Validate {
    /// The immutable table this builder produces.
    type Table: Table;

    /// Replace the builder's backing raw bytes.
    ///
    /// Any previously materialized structured state is discarded; the next
    /// structured access re-derives it from the new bytes. Externally
    /// supplied fields that described the old bytes (such as the loca
    /// builder's glyph count) are cleared and must be supplied again.
    fn reset_data(&mut self, data: TableData);

    /// Build an immutable table from the builder's current state.
    ///
    /// Structured edits take precedence over the backing raw bytes; the raw
    /// bytes are used only as a fallback when nothing has been parsed or
    /// set. The builder is not mutated, and remains usable for further
    /// edits.
    fn build(&self) -> Result<Self::Table, Error>;

    /// The exact number of bytes [`serialize`][Self::serialize] will produce.
    ///
    /// Queryable before any output allocation.
    fn serialized_len(&self) -> usize;

    /// Whether the builder's state is consistent enough to serialize.
    ///
    /// This is a cheap gate; content-level problems are reported by the
    /// [`Validate`] pass that runs inside [`serialize`][Self::serialize].
    fn ready_to_serialize(&self) -> bool;

    /// Serialize the builder's current state to fresh bytes.
    ///
    /// # Panics
    ///
    /// Panics if [`ready_to_serialize`][Self::ready_to_serialize] is false.
    /// Calling serialize on a builder that is not ready is a programming
    /// error, not a recoverable condition.
    fn serialize(&self) -> Result<Vec<u8>, Error> {
        assert!(
            self.ready_to_serialize(),
            "serialize called on a builder that is not ready"
        );
        self.validate().map_err(Error::ValidationFailed)?;
        let mut writer = TableWriter::default();
        self.write_into(&mut writer);
        let data = writer.into_data();
        debug_assert_eq!(data.len(), self.serialized_len());
        Ok(data)
    }
}

/// A builder for tables we do not restructure.
///
/// Most tables pass through an editing session untouched. This builder
/// implements the lifecycle with identity semantics: its "structured state"
/// is the raw bytes themselves.
#[derive(Clone, Debug)]
pub struct RawTableBuilder {
    header: TableHeader,
    data: Option<TableData>,
}

impl RawTableBuilder {
    /// A builder with no data yet.
    pub fn new(header: TableHeader) -> Self {
        RawTableBuilder { header, data: None }
    }

    /// A builder over existing table bytes.
    pub fn from_data(header: TableHeader, data: TableData) -> Self {
        RawTableBuilder {
            header,
            data: Some(data),
        }
    }

    /// The builder's current bytes, if any.
    pub fn data(&self) -> Option<&TableData> {
        self.data.as_ref()
    }
}

impl TableBuilder for RawTableBuilder {
    type Table = RawTable;

    fn reset_data(&mut self, data: TableData) {
        self.data = Some(data);
    }

    fn build(&self) -> Result<RawTable, Error> {
        let data = self
            .data
            .clone()
            .ok_or(Error::Read(crate::ReadError::MalformedData(
                "builder has no data",
            )))?;
        let header = self.header.with_length(data.len() as u32);
        RawTable::read(header, data).map_err(Error::Read)
    }

    fn serialized_len(&self) -> usize {
        self.data.as_ref().map(TableData::len).unwrap_or_default()
    }

    fn ready_to_serialize(&self) -> bool {
        self.data.is_some()
    }
}

impl FontWrite for RawTableBuilder {
    fn write_into(&self, writer: &mut TableWriter) {
        if let Some(data) = &self.data {
            writer.write_slice(data.as_bytes());
        }
    }
}

impl Validate for RawTableBuilder {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if self.data.is_none() {
            ctx.in_table("raw table", |ctx| ctx.report("builder has no data"));
        }
    }
}
