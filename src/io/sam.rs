/// SAM header lines and reference names
use crate::error::Error;
use crate::genome::RefCatalog;
use crate::io::options::SamOptions;
use bstr::ByteSlice;
use std::io::Write;

/// Characters that end a reference name (C `isspace` class).
const NAME_TERMINATORS: &[u8] = b" \t\n\x0b\x0c\r";

/// Write a reference name, cut at its first whitespace character.
///
/// Names must otherwise already satisfy SAM's `[!-()+-<>-~][!-~]*`; nothing
/// else is validated or escaped.
pub fn write_ref_name<W: Write>(sink: &mut W, name: &str) -> Result<(), Error> {
    let bytes = name.as_bytes();
    let end = bytes.find_byteset(NAME_TERMINATORS).unwrap_or(bytes.len());
    sink.write_all(&bytes[..end])?;
    Ok(())
}

/// Write the sanitized name of reference `id`.
pub fn write_ref_name_by_id<W: Write>(
    sink: &mut W,
    catalog: &RefCatalog,
    id: usize,
) -> Result<(), Error> {
    let reference = catalog.get(id).ok_or_else(|| {
        Error::Format(format!(
            "invalid reference id {} ({} references)",
            id,
            catalog.len()
        ))
    })?;
    write_ref_name(sink, &reference.name)
}

/// Writes the SAM header block for one output stream.
pub struct SamHeaderWriter<'a> {
    catalog: &'a RefCatalog,
    options: &'a SamOptions,
}

impl<'a> SamHeaderWriter<'a> {
    pub fn new(catalog: &'a RefCatalog, options: &'a SamOptions) -> Self {
        Self { catalog, options }
    }

    /// Write the header lines selected by the options.
    pub fn write<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        let (rg_id, rg_body) = self
            .options
            .read_group
            .as_ref()
            .map_or(("", ""), |rg| (rg.header_id.as_str(), rg.header_body.as_str()));
        self.write_lines(
            sink,
            rg_id,
            rg_body,
            self.options.print_hd,
            self.options.print_sq,
            self.options.print_pg,
        )
    }

    /// Write the header with explicit line selection.
    ///
    /// `rg_id` and `rg_body` are written verbatim after `@RG`, so they carry
    /// their own leading tabs. An empty `rg_id` suppresses the `@RG` line.
    /// Lines are written in the order @HD, @SQ, @RG, @PG.
    pub fn write_lines<W: Write>(
        &self,
        sink: &mut W,
        rg_id: &str,
        rg_body: &str,
        print_hd: bool,
        print_sq: bool,
        print_pg: bool,
    ) -> Result<(), Error> {
        if print_hd {
            self.write_hd_line(sink)?;
        }
        if print_sq {
            self.write_sq_lines(sink)?;
        }
        if !rg_id.is_empty() {
            sink.write_all(b"@RG")?;
            sink.write_all(rg_id.as_bytes())?;
            sink.write_all(rg_body.as_bytes())?;
            sink.write_all(b"\n")?;
        }
        if print_pg {
            self.write_pg_line(sink)?;
        }

        log::debug!(
            "Wrote SAM header (HD: {}, SQ: {}, RG: {}, PG: {})",
            print_hd,
            if print_sq { self.catalog.len() } else { 0 },
            !rg_id.is_empty(),
            print_pg
        );
        Ok(())
    }

    fn write_hd_line<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        writeln!(sink, "@HD\tVN:{}\tSO:unsorted", self.options.hd_version)?;
        Ok(())
    }

    fn write_sq_lines<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        for reference in self.catalog.iter() {
            sink.write_all(b"@SQ\tSN:")?;
            write_ref_name(sink, &reference.name)?;
            writeln!(sink, "\tLN:{}", reference.length)?;
        }
        Ok(())
    }

    fn write_pg_line<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        writeln!(
            sink,
            "@PG\tID:{}\tPN:{}\tVN:{}",
            self.options.program_id, self.options.program_name, self.options.program_version
        )?;
        Ok(())
    }
}
