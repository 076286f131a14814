//! Edit operations between a read and the reference, and the gap-run scan
//! behind the XM/XO/XG counts.

/// Kind of a single-base edit.
///
/// A read gap is a reference base with no read counterpart (a deletion in
/// CIGAR terms); a ref gap is a read base with no reference counterpart (an
/// insertion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Mismatch,
    ReadGap,
    RefGap,
}

/// A single-base difference between read and reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOp {
    /// Read offset the edit applies to. Every base of one read gap shares the
    /// offset of the read base that follows the gap.
    pub pos: usize,
    pub kind: EditKind,
    /// Reference base (ASCII), `b'-'` for a ref gap.
    pub ref_base: u8,
    /// Read base (ASCII), `b'-'` for a read gap.
    pub read_base: u8,
}

impl EditOp {
    pub fn mismatch(pos: usize, ref_base: u8, read_base: u8) -> Self {
        Self {
            pos,
            kind: EditKind::Mismatch,
            ref_base,
            read_base,
        }
    }

    pub fn read_gap(pos: usize, ref_base: u8) -> Self {
        Self {
            pos,
            kind: EditKind::ReadGap,
            ref_base,
            read_base: b'-',
        }
    }

    pub fn ref_gap(pos: usize, read_base: u8) -> Self {
        Self {
            pos,
            kind: EditKind::RefGap,
            ref_base: b'-',
            read_base,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self.kind, EditKind::ReadGap | EditKind::RefGap)
    }
}

/// Per-alignment edit counts as reported in the XM, XO, XG and NM fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub mismatches: usize,
    pub gap_opens: usize,
    /// Gap bases, including the opening base of each run.
    pub gap_extensions: usize,
    /// Total number of edit entries.
    pub edits: usize,
}

/// Position of the scan relative to gap runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a read gap run; all of its entries share this offset.
    InReadGapRun(usize),
    /// Inside a ref gap run; offset of the last entry seen.
    InRefGapRun(usize),
}

impl ScanState {
    /// Whether `edit` continues the run the scan is currently in.
    fn continues_run(self, edit: &EditOp) -> bool {
        match (self, edit.kind) {
            (Self::InReadGapRun(pos), EditKind::ReadGap) => edit.pos == pos,
            (Self::InRefGapRun(last), EditKind::RefGap) => edit.pos == last + 1,
            _ => false,
        }
    }
}

/// Count mismatches, gap opens and gap extensions over an ordered edit list.
///
/// Consecutive read gap entries at the same offset, or ref gap entries at
/// offsets increasing by one, form a single run: one open, one extension
/// per entry.
pub fn summarize_edits(edits: &[EditOp]) -> EditSummary {
    debug_assert!(
        edits.windows(2).all(|w| w[0].pos <= w[1].pos),
        "edit positions must be non-decreasing"
    );

    let mut summary = EditSummary {
        edits: edits.len(),
        ..EditSummary::default()
    };
    let mut state = ScanState::Normal;

    for edit in edits {
        match edit.kind {
            EditKind::Mismatch => {
                summary.mismatches += 1;
                state = ScanState::Normal;
            }
            EditKind::ReadGap | EditKind::RefGap => {
                if !state.continues_run(edit) {
                    summary.gap_opens += 1;
                }
                summary.gap_extensions += 1;
                state = match edit.kind {
                    EditKind::ReadGap => ScanState::InReadGapRun(edit.pos),
                    _ => ScanState::InRefGapRun(edit.pos),
                };
            }
        }
    }

    summary
}
