/// Per-record SAM optional fields (`TAG:TYPE:VALUE`), written in a fixed order
use crate::align::{AlignmentFlags, AlignmentResult, AlignmentSetSummary, MdScratch, Read};
use crate::error::Error;
use crate::io::options::{SamOptions, SamTag};
use std::io::Write;

/// Tracks whether a field has been written on the current line, so that
/// fields are tab-separated with no leading or trailing tab.
#[derive(Debug, Clone, Copy)]
pub struct FieldSeparator {
    field_written: bool,
}

impl FieldSeparator {
    /// `field_written` is true when the line already holds a column, so the
    /// first optional field needs a leading tab.
    pub fn new(field_written: bool) -> Self {
        Self { field_written }
    }

    /// Call before writing each field.
    pub fn before_field<W: Write>(&mut self, sink: &mut W) -> std::io::Result<()> {
        if self.field_written {
            sink.write_all(b"\t")?;
        }
        self.field_written = true;
        Ok(())
    }

    pub fn field_written(&self) -> bool {
        self.field_written
    }
}

/// Everything known about one aligned read that feeds its optional fields.
#[derive(Debug, Clone, Copy)]
pub struct AlignedRecord<'a> {
    pub read: &'a Read,
    pub result: &'a AlignmentResult,
    pub flags: &'a AlignmentFlags,
    pub summary: &'a AlignmentSetSummary,
    /// Inputs to the MAPQ calculation, reported in YI:Z when non-empty
    pub mapq_aux: &'a str,
    /// Leave the terminal read positions out of MD
    pub exclude_ends: bool,
}

/// Writes the optional-field block of SAM records.
pub struct OptionalFieldWriter<'a> {
    options: &'a SamOptions,
}

impl<'a> OptionalFieldWriter<'a> {
    pub fn new(options: &'a SamOptions) -> Self {
        Self { options }
    }

    /// Write all enabled optional fields for an aligned read.
    ///
    /// Returns whether the line holds at least one field afterwards.
    pub fn write_aligned<W: Write>(
        &self,
        sink: &mut W,
        field_written: bool,
        record: &AlignedRecord<'_>,
        scratch: &mut MdScratch,
    ) -> Result<bool, Error> {
        let opts = self.options;
        let AlignedRecord {
            read,
            result,
            flags,
            summary,
            mapq_aux,
            exclude_ends,
        } = *record;
        let mut sep = FieldSeparator::new(field_written);

        if opts.prints(SamTag::As) {
            write_int(sink, &mut sep, SamTag::As, result.score)?;
        }
        if result.color {
            if opts.prints(SamTag::Cs) {
                // Color read on its original strand, primer first
                start_field(sink, &mut sep, SamTag::Cs)?;
                if read.has_primer() {
                    debug_assert!(read.trim_color != crate::align::NO_PRIMER);
                    sink.write_all(&[read.primer, read.trim_color])?;
                }
                sink.write_all(&read.sequence)?;
            }
            if opts.prints(SamTag::Cq) {
                start_field(sink, &mut sep, SamTag::Cq)?;
                sink.write_all(&read.quality)?;
            }
        }
        if opts.prints(SamTag::Xs) {
            let second_best = summary.second_best_for(read.is_mate1_slot()).unwrap_or(0);
            write_int(sink, &mut sep, SamTag::Xs, second_best)?;
        }
        if opts.prints(SamTag::Xn) {
            write_int(sink, &mut sep, SamTag::Xn, result.ref_ns)?;
        }

        let edits = result.edit_summary();
        if opts.prints(SamTag::Xm) {
            write_int(sink, &mut sep, SamTag::Xm, edits.mismatches)?;
        }
        if opts.prints(SamTag::Xo) {
            write_int(sink, &mut sep, SamTag::Xo, edits.gap_opens)?;
        }
        if opts.prints(SamTag::Xg) {
            write_int(sink, &mut sep, SamTag::Xg, edits.gap_extensions)?;
        }
        if opts.prints(SamTag::Nm) {
            write_int(sink, &mut sep, SamTag::Nm, result.edit_distance())?;
        }
        if opts.prints(SamTag::Md) {
            start_field(sink, &mut sep, SamTag::Md)?;
            result.write_md(exclude_ends, scratch, sink)?;
        }
        if opts.prints(SamTag::Ys) && summary.paired() {
            debug_assert!(
                result.mate_score.is_some(),
                "paired alignment without a mate score"
            );
            if let Some(mate_score) = result.mate_score {
                write_int(sink, &mut sep, SamTag::Ys, mate_score)?;
            }
        }

        self.write_flag_fields(sink, &mut sep, flags)?;

        if opts.prints(SamTag::Yi) && !mapq_aux.is_empty() {
            start_field(sink, &mut sep, SamTag::Yi)?;
            sink.write_all(mapq_aux.as_bytes())?;
        }

        self.write_read_group(sink, &mut sep)?;
        Ok(sep.field_written())
    }

    /// Write the reduced field block of a read with no alignment: YT, YP,
    /// YM, YF and the read group, under the same conditions as for aligned
    /// reads.
    pub fn write_empty<W: Write>(
        &self,
        sink: &mut W,
        field_written: bool,
        flags: &AlignmentFlags,
    ) -> Result<bool, Error> {
        let mut sep = FieldSeparator::new(field_written);
        self.write_flag_fields(sink, &mut sep, flags)?;
        self.write_read_group(sink, &mut sep)?;
        Ok(sep.field_written())
    }

    /// YT, YP, YM and YF, shared by aligned and unaligned records
    fn write_flag_fields<W: Write>(
        &self,
        sink: &mut W,
        sep: &mut FieldSeparator,
        flags: &AlignmentFlags,
    ) -> Result<(), Error> {
        let opts = self.options;

        if opts.prints(SamTag::Yt) {
            start_field(sink, sep, SamTag::Yt)?;
            sink.write_all(flags.alignment_type.code().as_bytes())?;
        }
        if opts.prints(SamTag::Yp) && flags.part_of_pair() && flags.can_max() {
            write_int(sink, sep, SamTag::Yp, flags.paired_repetitive())?;
        }
        if opts.prints(SamTag::Ym)
            && flags.can_max()
            && (flags.is_mixed_mode() || !flags.part_of_pair())
        {
            write_int(sink, sep, SamTag::Ym, flags.unpaired_repetitive())?;
        }
        if opts.prints(SamTag::Yf) {
            if let Some(reason) = flags.filter_reason() {
                start_field(sink, sep, SamTag::Yf)?;
                sink.write_all(reason.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_read_group<W: Write>(
        &self,
        sink: &mut W,
        sep: &mut FieldSeparator,
    ) -> Result<(), Error> {
        let field = self.options.read_group_field();
        if !field.is_empty() {
            sep.before_field(sink)?;
            sink.write_all(field.as_bytes())?;
        }
        Ok(())
    }
}

/// Separator plus `TAG:TYPE:` prefix
fn start_field<W: Write>(
    sink: &mut W,
    sep: &mut FieldSeparator,
    tag: SamTag,
) -> std::io::Result<()> {
    sep.before_field(sink)?;
    let name = tag.tag();
    let name: &[u8; 2] = name.as_ref();
    sink.write_all(name)?;
    sink.write_all(&[b':', tag.value_type(), b':'])
}

fn write_int<W: Write, V: std::fmt::Display>(
    sink: &mut W,
    sep: &mut FieldSeparator,
    tag: SamTag,
    value: V,
) -> std::io::Result<()> {
    debug_assert_eq!(tag.value_type(), b'i');
    start_field(sink, sep, tag)?;
    write!(sink, "{}", value)
}
