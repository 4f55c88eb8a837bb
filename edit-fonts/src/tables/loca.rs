//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use sfnt_types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::{
    builder::{BuilderState, TableBuilder},
    error::Error,
    font_data::FontData,
    read::{FontReadWithArgs, ReadArgs, ReadError},
    table::{Table, TableData, TableHeader, TopLevelTable},
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// Whether the loca table uses short or long offsets.
///
/// This flag is not stored in the loca table's own bytes; it lives in the
/// head table's indexToLocFormat field, and must be supplied to this module
/// from outside before parsing or serializing.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocaFormat {
    /// Offsets are stored halved, in 16 bits.
    Short = 0,
    /// Offsets are stored directly, in 32 bits.
    Long = 1,
}

impl LocaFormat {
    /// The largest offset representable in the short format.
    pub const MAX_SHORT_OFFSET: u32 = u16::MAX as u32 * 2;

    /// The encoded size of a single offset under this format, in bytes.
    pub const fn unit_len(self) -> usize {
        match self {
            LocaFormat::Short => <BigEndian<u16>>::RAW_BYTE_LEN,
            LocaFormat::Long => <BigEndian<u32>>::RAW_BYTE_LEN,
        }
    }

    /// Interpret a raw head.indexToLocFormat value.
    pub fn from_index_to_loc_format(raw: i16) -> Result<LocaFormat, ReadError> {
        match raw {
            0 => Ok(LocaFormat::Short),
            1 => Ok(LocaFormat::Long),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }

    /// Choose the smallest lossless format for the given offsets.
    pub fn for_offsets(offsets: &[u32]) -> LocaFormat {
        if offsets.last().copied().unwrap_or_default() <= Self::MAX_SHORT_OFFSET
            && offsets.iter().all(|offset| offset % 2 == 0)
        {
            LocaFormat::Short
        } else {
            LocaFormat::Long
        }
    }
}

/// A borrowed view of raw loca data, decoded per format.
///
/// This is the single source of truth for the on-disk codec: the short
/// format stores each offset halved in 16 bits, the long format stores it
/// directly in 32 bits.
#[derive(Clone, Copy)]
pub enum Loca<'a> {
    /// Short (halved, 16-bit) entries.
    Short(&'a [BigEndian<u16>]),
    /// Long (direct, 32-bit) entries.
    Long(&'a [BigEndian<u32>]),
}

impl ReadArgs for Loca<'_> {
    /// The format and the externally supplied glyph count.
    type Args = (LocaFormat, u16);
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let (format, num_glyphs) = *args;
        let num_locas = num_glyphs as usize + 1;
        match format {
            LocaFormat::Short => data
                .read_array(0..num_locas * format.unit_len())
                .map(Loca::Short),
            LocaFormat::Long => data
                .read_array(0..num_locas * format.unit_len())
                .map(Loca::Long),
        }
    }
}

impl<'a> Loca<'a> {
    /// Read a view covering exactly `num_glyphs + 1` entries.
    ///
    /// Fails with `OutOfBounds` if the data is too short for that many
    /// entries; trailing bytes beyond them are ignored.
    pub fn read(data: FontData<'a>, format: LocaFormat, num_glyphs: u16) -> Result<Self, ReadError> {
        Self::read_with_args(data, &(format, num_glyphs))
    }

    /// The number of entries, one more than the number of glyphs.
    #[allow(clippy::len_without_is_empty)] // a loca view always has at least one entry
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len(),
            Loca::Long(data) => data.len(),
        }
    }

    /// The decoded offset at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(index).map(|unit| unit.get() as u32 * 2),
            Loca::Long(data) => data.get(index).map(|unit| unit.get()),
        }
    }

    fn to_vec(self) -> Vec<u32> {
        match self {
            Loca::Short(data) => data.iter().map(|unit| unit.get() as u32 * 2).collect(),
            Loca::Long(data) => data.iter().map(|unit| unit.get()).collect(),
        }
    }
}

/// The loca table.
///
/// An array of `num_glyphs + 1` offsets into the glyf table, one per glyph
/// plus a terminator whose value sizes the final glyph. The table is
/// immutable; it can be cloned cheaply and read from multiple places
/// concurrently.
#[derive(Clone, Debug)]
pub struct LocaTable {
    header: TableHeader,
    data: TableData,
    format: LocaFormat,
    num_glyphs: u16,
}

impl TopLevelTable for LocaTable {
    const TAG: Tag = Tag::new(b"loca");
}

impl LocaTable {
    /// Interpret `data` as a loca table.
    ///
    /// Neither `format` nor `num_glyphs` is recoverable from the loca bytes
    /// themselves; they come from the font's head and maxp tables. Fails
    /// with `OutOfBounds` if the data does not cover `num_glyphs + 1`
    /// encoded offsets.
    pub fn read(
        header: TableHeader,
        data: TableData,
        format: LocaFormat,
        num_glyphs: u16,
    ) -> Result<Self, ReadError> {
        Loca::read(data.font_data(), format, num_glyphs)?;
        Ok(LocaTable {
            header,
            data,
            format,
            num_glyphs,
        })
    }

    /// The format the offsets are stored in.
    pub fn format(&self) -> LocaFormat {
        self.format
    }

    /// The number of glyphs this table covers.
    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    /// The number of locations, one more than the number of glyphs.
    pub fn num_locas(&self) -> usize {
        self.num_glyphs as usize + 1
    }

    fn view(&self) -> Result<Loca<'_>, ReadError> {
        // in bounds; checked when the table was read
        Loca::read(self.data.font_data(), self.format, self.num_glyphs)
    }

    /// The decoded value of the loca entry at `index`.
    ///
    /// Valid indices run from 0 to the number of glyphs, inclusive.
    pub fn loca(&self, index: usize) -> Result<u32, ReadError> {
        self.view()?.get(index).ok_or(ReadError::OutOfBounds)
    }

    /// The offset into the glyf table for the given glyph.
    ///
    /// The zero entry is the special entry for the notdef glyph. The entry
    /// one past the last glyph id is also legal; it exists only to compute
    /// the final glyph's length.
    pub fn glyph_offset(&self, glyph_id: GlyphId) -> Result<u32, ReadError> {
        self.loca(glyph_id.to_u16() as usize)
    }

    /// The length of the data in the glyf table for the given glyph.
    ///
    /// Unlike [`glyph_offset`][Self::glyph_offset], the one-past-the-end id
    /// is not valid here: there is no further entry to subtract from.
    pub fn glyph_length(&self, glyph_id: GlyphId) -> Result<u32, ReadError> {
        let index = glyph_id.to_u16() as usize;
        if index >= self.num_glyphs as usize {
            return Err(ReadError::OutOfBounds);
        }
        let start = self.loca(index)?;
        let end = self.loca(index + 1)?;
        end.checked_sub(start)
            .ok_or(ReadError::MalformedData("loca offsets are not ordered"))
    }

    /// An iterator over the decoded values of this table, in glyph order.
    pub fn iter(&self) -> LocaIter<'_> {
        LocaIter {
            table: self,
            index: 0,
        }
    }
}

impl Table for LocaTable {
    fn header(&self) -> &TableHeader {
        &self.header
    }

    fn data(&self) -> &TableData {
        &self.data
    }
}

impl FontWrite for LocaTable {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(self.data.as_bytes())
    }
}

/// An iterator over the values of a [`LocaTable`].
///
/// This borrows its source table, and cannot outlive it; create a fresh one
/// per traversal.
pub struct LocaIter<'a> {
    table: &'a LocaTable,
    index: usize,
}

impl Iterator for LocaIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let value = self.table.loca(self.index).ok()?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.num_locas().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LocaIter<'_> {}

impl<'a> IntoIterator for &'a LocaTable {
    type Item = u32;
    type IntoIter = LocaIter<'a>;

    fn into_iter(self) -> LocaIter<'a> {
        self.iter()
    }
}

/// A mutable builder for the loca table.
///
/// The builder is a lazy two-way binding between the raw bytes it was given
/// and an edited list of offsets: the list is materialized from the raw
/// bytes on the first structured access, and from then on edits to the list
/// take precedence over the bytes.
///
/// Because the byte format is not self-describing, the glyph count must be
/// supplied (via [`from_data`][Self::from_data] or
/// [`set_num_glyphs`][Self::set_num_glyphs]) before the first structured
/// access whenever the raw data is replaced.
#[derive(Clone, Debug)]
pub struct LocaBuilder {
    header: TableHeader,
    format: LocaFormat,
    num_glyphs: Option<u16>,
    data: Option<TableData>,
    state: BuilderState<Vec<u32>>,
}

impl LocaBuilder {
    /// A builder with no backing data and no offsets yet.
    pub fn new(format: LocaFormat) -> Self {
        LocaBuilder {
            header: TableHeader::of(LocaTable::TAG),
            format,
            num_glyphs: None,
            data: None,
            state: BuilderState::Unparsed,
        }
    }

    /// A builder over existing table bytes.
    pub fn from_data(
        header: TableHeader,
        data: TableData,
        format: LocaFormat,
        num_glyphs: u16,
    ) -> Self {
        LocaBuilder {
            header,
            format,
            num_glyphs: Some(num_glyphs),
            data: Some(data),
            state: BuilderState::Unparsed,
        }
    }

    /// The format used by subsequent serialization.
    pub fn format(&self) -> LocaFormat {
        self.format
    }

    /// Set the format used by subsequent serialization.
    ///
    /// This does not reinterpret structured state that has already been
    /// parsed; it only selects how the list is encoded from here on.
    pub fn set_format(&mut self, format: LocaFormat) {
        self.format = format;
    }

    /// The externally supplied glyph count, if set.
    pub fn num_glyphs(&self) -> Option<u16> {
        self.num_glyphs
    }

    /// Set the number of glyphs.
    ///
    /// This is the count the builder will use to parse location data out of
    /// its raw bytes. It must be set whenever the raw data is replaced,
    /// before the first structured access, and it gates serialization.
    pub fn set_num_glyphs(&mut self, num_glyphs: u16) {
        self.num_glyphs = Some(num_glyphs);
    }

    /// The live list of offsets for this builder.
    ///
    /// On first access the list is parsed from the builder's raw data; if
    /// there is no data (and no list has been set) the list starts empty.
    /// The returned list may be manipulated in any way by the caller, and
    /// the changes will be reflected in the final table produced.
    ///
    /// # Panics
    ///
    /// Panics if raw data is present but no glyph count has been set; the
    /// byte format cannot be parsed without one.
    pub fn loca_list(&mut self) -> Result<&mut Vec<u32>, ReadError> {
        if let BuilderState::Unparsed = self.state {
            self.state = BuilderState::Parsed(self.parse_list()?);
        }
        match &mut self.state {
            BuilderState::Parsed(list) => Ok(list),
            // we just parsed
            BuilderState::Unparsed => unreachable!(),
        }
    }

    fn parse_list(&self) -> Result<Vec<u32>, ReadError> {
        let Some(data) = &self.data else {
            return Ok(Vec::new());
        };
        let num_glyphs = self
            .num_glyphs
            .expect("glyph count must be set before parsing loca data");
        let expected = (num_glyphs as usize + 1) * self.format.unit_len();
        if data.len() > expected {
            log::warn!(
                "loca data is {} bytes, expected {expected}; ignoring trailing bytes",
                data.len()
            );
        }
        Loca::read(data.font_data(), self.format, num_glyphs).map(Loca::to_vec)
    }

    /// Replace the loca list outright, bypassing parsing.
    ///
    /// The builder takes ownership of the list; any previously parsed or
    /// set state is discarded.
    pub fn set_loca_list(&mut self, list: Vec<u32>) {
        self.state = BuilderState::Parsed(list);
    }

    /// The number of locations in the live list.
    pub fn num_locas(&mut self) -> Result<usize, ReadError> {
        self.loca_list().map(|list| list.len())
    }

    /// The value at `index` in the live list.
    pub fn loca(&mut self, index: usize) -> Result<u32, ReadError> {
        self.loca_list()?
            .get(index)
            .copied()
            .ok_or(ReadError::OutOfBounds)
    }

    /// The offset for the given glyph, per the live list.
    ///
    /// As on the read side, the one-past-the-end id is legal.
    pub fn glyph_offset(&mut self, glyph_id: GlyphId) -> Result<u32, ReadError> {
        self.loca(glyph_id.to_u16() as usize)
    }

    /// The length of the given glyph's data, per the live list.
    pub fn glyph_length(&mut self, glyph_id: GlyphId) -> Result<u32, ReadError> {
        let index = glyph_id.to_u16() as usize;
        let list = self.loca_list()?;
        let start = *list.get(index).ok_or(ReadError::OutOfBounds)?;
        let end = *list.get(index + 1).ok_or(ReadError::OutOfBounds)?;
        end.checked_sub(start)
            .ok_or(ReadError::MalformedData("loca offsets are not ordered"))
    }

    /// Discard structured edits, restoring the original raw bytes.
    ///
    /// The next structured access re-parses the data the builder was given.
    pub fn revert(&mut self) {
        self.state = BuilderState::Unparsed;
    }

    /// Wipe all state.
    ///
    /// Afterwards the builder holds an explicitly empty list and no raw
    /// fallback; this is a distinct state from a freshly reset builder,
    /// which would re-parse its bytes.
    pub fn clear(&mut self) {
        self.data = None;
        self.num_glyphs = None;
        self.state = BuilderState::Parsed(Vec::new());
    }

    /// The builder's lifecycle state, for inspection.
    pub fn state(&self) -> &BuilderState<Vec<u32>> {
        &self.state
    }
}

impl TableBuilder for LocaBuilder {
    type Table = LocaTable;

    fn reset_data(&mut self, data: TableData) {
        self.data = Some(data);
        // the count described the old bytes; require a fresh one
        self.num_glyphs = None;
        self.state = BuilderState::Unparsed;
    }

    fn build(&self) -> Result<LocaTable, Error> {
        let num_glyphs = self.num_glyphs.ok_or(Error::Read(ReadError::MalformedData(
            "glyph count not set",
        )))?;
        let data = match &self.state {
            BuilderState::Parsed(_) => {
                self.validate().map_err(Error::ValidationFailed)?;
                let mut writer = TableWriter::default();
                self.write_into(&mut writer);
                TableData::from(writer.into_data())
            }
            BuilderState::Unparsed => self
                .data
                .clone()
                .ok_or(Error::Read(ReadError::MalformedData("builder has no data")))?,
        };
        let header = self.header.with_length(data.len() as u32);
        LocaTable::read(header, data, self.format, num_glyphs).map_err(Error::Read)
    }

    fn serialized_len(&self) -> usize {
        match &self.state {
            BuilderState::Parsed(list) => list.len() * self.format.unit_len(),
            BuilderState::Unparsed => {
                self.data.as_ref().map(TableData::len).unwrap_or_default()
            }
        }
    }

    fn ready_to_serialize(&self) -> bool {
        self.num_glyphs.is_some()
            && match &self.state {
                BuilderState::Parsed(list) => !list.is_empty() || self.data.is_some(),
                BuilderState::Unparsed => self.data.is_some(),
            }
    }
}

impl FontWrite for LocaBuilder {
    fn write_into(&self, writer: &mut TableWriter) {
        match &self.state {
            BuilderState::Parsed(list) => match self.format {
                LocaFormat::Long => list.as_slice().write_into(writer),
                // odd offsets are rejected by validation before we get here,
                // so the halving below is lossless
                LocaFormat::Short => list
                    .iter()
                    .for_each(|offset| ((offset >> 1) as u16).write_into(writer)),
            },
            BuilderState::Unparsed => {
                if let Some(data) = &self.data {
                    writer.write_slice(data.as_bytes());
                }
            }
        }
    }
}

impl Validate for LocaBuilder {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("loca", |ctx| {
            let Some(num_glyphs) = self.num_glyphs else {
                ctx.report("glyph count not set");
                return;
            };
            let num_locas = num_glyphs as usize + 1;
            match &self.state {
                BuilderState::Parsed(list) => ctx.in_field("loca_list", |ctx| {
                    if list.len() != num_locas {
                        ctx.report(format!(
                            "expected {num_locas} entries for {num_glyphs} glyphs, found {}",
                            list.len()
                        ));
                    }
                    ctx.in_array(|ctx| {
                        let mut prev = None;
                        for offset in list {
                            ctx.array_item(|ctx| {
                                if prev.is_some_and(|prev| *offset < prev) {
                                    ctx.report("offset is smaller than its predecessor");
                                }
                                if self.format == LocaFormat::Short {
                                    if offset % 2 != 0 {
                                        ctx.report(
                                            "odd offset cannot be stored in the short format",
                                        );
                                    } else if *offset > LocaFormat::MAX_SHORT_OFFSET {
                                        ctx.report("offset too large for the short format");
                                    }
                                }
                                prev = Some(*offset);
                            });
                        }
                    });
                }),
                BuilderState::Unparsed => match &self.data {
                    Some(data) if data.len() < num_locas * self.format.unit_len() => {
                        ctx.in_field("data", |ctx| {
                            ctx.report(format!(
                                "{} bytes cannot hold {num_locas} entries",
                                data.len()
                            ))
                        });
                    }
                    Some(_) => (),
                    None => ctx.report("no data and no loca list"),
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// encode raw stored units (not decoded offsets) as table bytes
    fn make_data(format: LocaFormat, units: &[u32]) -> TableData {
        let mut writer = TableWriter::default();
        for unit in units {
            match format {
                LocaFormat::Short => (*unit as u16).write_into(&mut writer),
                LocaFormat::Long => unit.write_into(&mut writer),
            }
        }
        TableData::from(writer.into_data())
    }

    fn read_table(format: LocaFormat, units: &[u32], num_glyphs: u16) -> LocaTable {
        let data = make_data(format, units);
        let header = TableHeader::new(LocaTable::TAG, 0, 0, data.len() as u32);
        LocaTable::read(header, data, format, num_glyphs).unwrap()
    }

    #[test]
    fn short_format_concrete_scenario() {
        // raw units [0, 5, 5, 12] represent actual offsets 0, 10, 10, 24
        let table = read_table(LocaFormat::Short, &[0, 5, 5, 12], 3);
        assert_eq!(table.num_glyphs(), 3);
        assert_eq!(table.num_locas(), 4);
        assert_eq!(table.glyph_offset(GlyphId::new(0)).unwrap(), 0);
        assert_eq!(table.glyph_length(GlyphId::new(0)).unwrap(), 10);
        assert_eq!(table.glyph_offset(GlyphId::new(1)).unwrap(), 10);
        // an empty glyph is legal
        assert_eq!(table.glyph_length(GlyphId::new(1)).unwrap(), 0);
        assert_eq!(table.glyph_offset(GlyphId::new(2)).unwrap(), 10);
        assert_eq!(table.glyph_length(GlyphId::new(2)).unwrap(), 14);
        assert_eq!(table.glyph_offset(GlyphId::new(3)).unwrap(), 24);
    }

    #[test]
    fn long_format_concrete_scenario() {
        let table = read_table(LocaFormat::Long, &[0, 37, 101], 2);
        assert_eq!(table.glyph_length(GlyphId::new(0)).unwrap(), 37);
        assert_eq!(table.glyph_length(GlyphId::new(1)).unwrap(), 64);
    }

    #[test]
    fn boundary_access() {
        let table = read_table(LocaFormat::Short, &[0, 5, 5, 12], 3);
        // the one-past-the-last-glyph entry is legal...
        assert_eq!(table.glyph_offset(GlyphId::new(3)).unwrap(), 24);
        // ...but nothing beyond it, and no length for it
        assert_eq!(
            table.glyph_offset(GlyphId::new(4)),
            Err(ReadError::OutOfBounds)
        );
        assert_eq!(table.loca(4), Err(ReadError::OutOfBounds));
        assert_eq!(
            table.glyph_length(GlyphId::new(3)),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn length_invariant() {
        let table = read_table(LocaFormat::Long, &[0, 10, 10, 24, 100], 4);
        for gid in 0..table.num_glyphs() {
            let length = table.glyph_length(GlyphId::new(gid)).unwrap();
            let start = table.glyph_offset(GlyphId::new(gid)).unwrap();
            let end = table.glyph_offset(GlyphId::new(gid + 1)).unwrap();
            assert_eq!(length, end - start);
        }
    }

    #[test]
    fn read_rejects_short_data() {
        let data = make_data(LocaFormat::Short, &[0, 5, 5, 12]);
        let header = TableHeader::new(LocaTable::TAG, 0, 0, data.len() as u32);
        // four units cannot cover 4 glyphs (which need 5)
        assert!(matches!(
            LocaTable::read(header, data, LocaFormat::Short, 4),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn iterator_walks_all_locas() {
        let table = read_table(LocaFormat::Short, &[0, 5, 5, 12], 3);
        let values = table.iter().collect::<Vec<_>>();
        assert_eq!(values, [0, 10, 10, 24]);
        assert_eq!(table.iter().len(), 4);
        // iteration is restartable by recreation
        assert_eq!(table.iter().next(), Some(0));
    }

    #[test]
    fn format_from_head_field() {
        assert_eq!(
            LocaFormat::from_index_to_loc_format(0).unwrap(),
            LocaFormat::Short
        );
        assert_eq!(
            LocaFormat::from_index_to_loc_format(1).unwrap(),
            LocaFormat::Long
        );
        assert!(matches!(
            LocaFormat::from_index_to_loc_format(2),
            Err(ReadError::InvalidFormat(2))
        ));
    }

    #[test]
    fn format_heuristic() {
        assert_eq!(LocaFormat::for_offsets(&[0, 2, 4]), LocaFormat::Short);
        assert_eq!(LocaFormat::for_offsets(&[0, 2, 5]), LocaFormat::Long);
        assert_eq!(
            LocaFormat::for_offsets(&[0, 2, 0x20000]),
            LocaFormat::Long
        );
        assert_eq!(LocaFormat::for_offsets(&[]), LocaFormat::Short);
    }

    fn builder_over(format: LocaFormat, units: &[u32], num_glyphs: u16) -> LocaBuilder {
        let data = make_data(format, units);
        let header = TableHeader::new(LocaTable::TAG, 0, 0, data.len() as u32);
        LocaBuilder::from_data(header, data, format, num_glyphs)
    }

    #[rstest]
    #[case::empty(vec![0])]
    #[case::simple(vec![0, 10, 10, 24])]
    #[case::large(vec![0, 0x1000, 0x2000, 0x1fffe])]
    fn round_trip_short(#[case] offsets: Vec<u32>) {
        let mut builder = LocaBuilder::new(LocaFormat::Short);
        builder.set_num_glyphs(offsets.len() as u16 - 1);
        builder.set_loca_list(offsets.clone());
        let bytes = builder.serialize().unwrap();
        assert_eq!(bytes.len(), builder.serialized_len());

        let header = TableHeader::new(LocaTable::TAG, 0, 0, bytes.len() as u32);
        let reread = LocaTable::read(
            header,
            bytes.into(),
            LocaFormat::Short,
            offsets.len() as u16 - 1,
        )
        .unwrap();
        assert_eq!(reread.iter().collect::<Vec<_>>(), offsets);
    }

    #[rstest]
    #[case::empty(vec![0])]
    #[case::odd_values(vec![0, 37, 101])]
    #[case::huge(vec![0, 0x30000, 0xdead_beef])]
    fn round_trip_long(#[case] offsets: Vec<u32>) {
        let mut builder = LocaBuilder::new(LocaFormat::Long);
        builder.set_num_glyphs(offsets.len() as u16 - 1);
        builder.set_loca_list(offsets.clone());
        let bytes = builder.serialize().unwrap();
        assert_eq!(bytes.len(), builder.serialized_len());

        let header = TableHeader::new(LocaTable::TAG, 0, 0, bytes.len() as u32);
        let reread = LocaTable::read(
            header,
            bytes.into(),
            LocaFormat::Long,
            offsets.len() as u16 - 1,
        )
        .unwrap();
        assert_eq!(reread.iter().collect::<Vec<_>>(), offsets);
    }

    #[test]
    fn lazy_parse_is_idempotent() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        assert!(!builder.state().is_parsed());
        let first = builder.loca_list().unwrap().clone();
        assert!(builder.state().is_parsed());
        let second = builder.loca_list().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(first, [0, 10, 10, 24]);
    }

    #[test]
    fn list_mutations_persist() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        builder.loca_list().unwrap()[3] = 30;
        assert_eq!(builder.loca(3).unwrap(), 30);
        assert_eq!(builder.glyph_length(GlyphId::new(2)).unwrap(), 20);

        let table = builder.build().unwrap();
        assert_eq!(table.glyph_offset(GlyphId::new(3)).unwrap(), 30);
    }

    #[test]
    fn builder_mirrors_read_side_accessors() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        assert_eq!(builder.num_locas().unwrap(), 4);
        assert_eq!(builder.glyph_offset(GlyphId::new(1)).unwrap(), 10);
        assert_eq!(builder.glyph_length(GlyphId::new(1)).unwrap(), 0);
        assert_eq!(
            builder.glyph_length(GlyphId::new(3)),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn revert_restores_parsed_bytes() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        let original = builder.loca_list().unwrap().clone();
        builder.set_loca_list(vec![0, 2, 4, 6]);
        assert_eq!(builder.loca(1).unwrap(), 2);

        builder.revert();
        assert!(!builder.state().is_parsed());
        assert_eq!(*builder.loca_list().unwrap(), original);
    }

    #[test]
    fn clear_is_empty_but_explicit() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        builder.clear();
        assert!(builder.state().is_parsed());
        assert_eq!(builder.num_locas().unwrap(), 0);
        assert!(!builder.ready_to_serialize());
    }

    #[test]
    fn reset_data_requires_fresh_glyph_count() {
        let mut builder = builder_over(LocaFormat::Long, &[0, 37, 101], 2);
        builder.loca_list().unwrap();
        builder.reset_data(make_data(LocaFormat::Long, &[0, 8]));
        assert!(!builder.state().is_parsed());
        assert_eq!(builder.num_glyphs(), None);
        assert!(!builder.ready_to_serialize());
        builder.set_num_glyphs(1);
        assert_eq!(*builder.loca_list().unwrap(), [0, 8]);
    }

    #[test]
    #[should_panic(expected = "glyph count must be set")]
    fn parsing_without_glyph_count_is_fatal() {
        let mut builder = builder_over(LocaFormat::Long, &[0, 37, 101], 2);
        builder.reset_data(make_data(LocaFormat::Long, &[0, 8]));
        let _ = builder.loca_list();
    }

    #[test]
    fn odd_offset_under_short_format_fails_loudly() {
        let mut builder = LocaBuilder::new(LocaFormat::Short);
        builder.set_num_glyphs(1);
        builder.set_loca_list(vec![0, 7]);
        let error = builder.serialize().unwrap_err();
        assert!(error
            .to_string()
            .contains("odd offset cannot be stored in the short format"));
    }

    #[test]
    fn unordered_offsets_fail_validation() {
        let mut builder = LocaBuilder::new(LocaFormat::Long);
        builder.set_num_glyphs(2);
        builder.set_loca_list(vec![0, 100, 50]);
        assert!(builder.serialize().is_err());
        assert!(builder.validate().is_err());
    }

    #[test]
    fn list_length_must_match_glyph_count() {
        let mut builder = LocaBuilder::new(LocaFormat::Long);
        builder.set_num_glyphs(5);
        builder.set_loca_list(vec![0, 10, 20]);
        let error = builder.validate().unwrap_err();
        assert!(error.to_string().contains("expected 6 entries"));
    }

    #[test]
    fn unparsed_builder_serializes_raw_bytes() {
        let builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        assert!(builder.ready_to_serialize());
        assert_eq!(builder.serialized_len(), 8);
        let bytes = builder.serialize().unwrap();
        assert_eq!(bytes, make_data(LocaFormat::Short, &[0, 5, 5, 12]).as_bytes());
    }

    #[test]
    fn build_prefers_structured_state() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        builder.set_loca_list(vec![0, 2, 4, 6]);
        let table = builder.build().unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), [0, 2, 4, 6]);
        // the builder stays usable, and unedited raw bytes are still there
        builder.revert();
        let table = builder.build().unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), [0, 10, 10, 24]);
    }

    #[test]
    fn format_switch_changes_encoding_only() {
        let mut builder = builder_over(LocaFormat::Short, &[0, 5, 5, 12], 3);
        // parse under the short format, then re-encode long
        builder.loca_list().unwrap();
        builder.set_format(LocaFormat::Long);
        assert_eq!(builder.serialized_len(), 16);
        let bytes = builder.serialize().unwrap();

        let header = TableHeader::new(LocaTable::TAG, 0, 0, bytes.len() as u32);
        let reread = LocaTable::read(header, bytes.into(), LocaFormat::Long, 3).unwrap();
        assert_eq!(reread.iter().collect::<Vec<_>>(), [0, 10, 10, 24]);
    }

    #[test]
    fn new_builder_starts_with_an_empty_list() {
        let mut builder = LocaBuilder::new(LocaFormat::Long);
        assert!(!builder.ready_to_serialize());
        assert!(builder.loca_list().unwrap().is_empty());
    }
}
