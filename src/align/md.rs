/// MD:Z string construction from an alignment's edit list
use std::io::Write;

use crate::align::edit::EditKind;
use crate::align::result::AlignmentResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdOp {
    /// Run of matching bases
    Match,
    /// Substituted reference base
    Mismatch,
    /// Reference base absent from the read
    Deletion,
}

/// Reusable working storage for MD construction.
///
/// Holds three parallel lists (operation, reference base, run length).
/// Contents are only meaningful during a single call; give each worker
/// thread its own instance.
#[derive(Debug, Default, Clone)]
pub struct MdScratch {
    ops: Vec<MdOp>,
    chars: Vec<u8>,
    runs: Vec<usize>,
}

impl MdScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.chars.clear();
        self.runs.clear();
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn push_match(&mut self) {
        if let (Some(MdOp::Match), Some(run)) = (self.ops.last(), self.runs.last_mut()) {
            *run += 1;
            return;
        }
        self.ops.push(MdOp::Match);
        self.chars.push(b'=');
        self.runs.push(1);
    }

    fn push_base(&mut self, op: MdOp, ref_base: u8) {
        self.ops.push(op);
        self.chars.push(ref_base.to_ascii_uppercase());
        self.runs.push(1);
    }

    /// Render the collected operations using the MD grammar
    /// `[0-9]+(([A-Z]|\^[A-Z]+)[0-9]+)*`.
    fn render<W: Write>(&self, sink: &mut W) -> std::io::Result<()> {
        let mut need_number = true;
        let mut in_deletion = false;

        for ((op, &ch), &run) in self.ops.iter().zip(&self.chars).zip(&self.runs) {
            match op {
                MdOp::Match => {
                    write!(sink, "{}", run)?;
                    need_number = false;
                    in_deletion = false;
                }
                MdOp::Mismatch => {
                    if need_number {
                        sink.write_all(b"0")?;
                    }
                    sink.write_all(&[ch])?;
                    need_number = true;
                    in_deletion = false;
                }
                MdOp::Deletion => {
                    if !in_deletion {
                        if need_number {
                            sink.write_all(b"0")?;
                        }
                        sink.write_all(b"^")?;
                    }
                    sink.write_all(&[ch])?;
                    need_number = true;
                    in_deletion = true;
                }
            }
        }

        if need_number {
            sink.write_all(b"0")?;
        }
        Ok(())
    }
}

impl AlignmentResult {
    /// Collect MD operations for this alignment into `scratch`.
    ///
    /// With `exclude_ends`, the first and last aligned read positions are
    /// left out entirely: edits there are ignored and they add no matches.
    pub fn collect_md_ops(&self, exclude_ends: bool, scratch: &mut MdScratch) {
        scratch.clear();

        let len = self.read_extent;
        let kept = if exclude_ends {
            1..len.saturating_sub(1)
        } else {
            0..len
        };

        let edits = &self.edits;
        let mut next = 0;
        for pos in 0..len {
            let start = next;
            while next < edits.len() && edits[next].pos == pos {
                next += 1;
            }
            if !kept.contains(&pos) {
                continue;
            }
            let here = &edits[start..next];

            // Deleted reference bases precede the read base at this offset.
            // A deletion before the first kept base lies outside the span.
            if pos > kept.start || !exclude_ends {
                for edit in here.iter().filter(|e| e.kind == EditKind::ReadGap) {
                    scratch.push_base(MdOp::Deletion, edit.ref_base);
                }
            }

            match here.iter().find(|e| e.kind != EditKind::ReadGap) {
                Some(edit) if edit.kind == EditKind::Mismatch => {
                    scratch.push_base(MdOp::Mismatch, edit.ref_base);
                }
                Some(_) => {} // inserted read base, invisible in MD
                None => scratch.push_match(),
            }
        }
    }

    /// Write the MD string for this alignment to `sink`.
    pub fn write_md<W: Write>(
        &self,
        exclude_ends: bool,
        scratch: &mut MdScratch,
        sink: &mut W,
    ) -> std::io::Result<()> {
        self.collect_md_ops(exclude_ends, scratch);
        scratch.render(sink)
    }
}
