/// Alignment records handed to the SAM formatter by the aligner
use crate::align::edit::{summarize_edits, EditOp, EditSummary};

/// A finished alignment of one read (or one mate).
#[derive(Debug, Clone, Default)]
pub struct AlignmentResult {
    /// Reference id in the catalog
    pub ref_id: usize,
    /// Alignment score
    pub score: i64,
    /// Score of the opposite mate's alignment, when aligned as a pair
    pub mate_score: Option<i64>,
    /// Edits ordered by read offset
    pub edits: Vec<EditOp>,
    /// Ambiguous reference bases overlapped by the alignment
    pub ref_ns: usize,
    /// Number of aligned read positions (soft clips excluded)
    pub read_extent: usize,
    /// Whether the read was aligned in color space
    pub color: bool,
}

impl AlignmentResult {
    /// Mismatch and gap-run counts for this alignment
    pub fn edit_summary(&self) -> EditSummary {
        summarize_edits(&self.edits)
    }

    /// Edit distance as reported in NM: one per edit entry
    pub fn edit_distance(&self) -> usize {
        self.edits.len()
    }
}

/// Marker stored in `Read::primer` when the input had no primer base.
pub const NO_PRIMER: u8 = b'?';

/// The read as it appeared in the input, on its original strand.
#[derive(Debug, Clone)]
pub struct Read {
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
    /// Color-space primer base, or `NO_PRIMER`
    pub primer: u8,
    /// First color, trimmed off the read along with the primer
    pub trim_color: u8,
    /// 0 = unpaired, 1 = mate 1, 2 = mate 2
    pub mate: u8,
}

impl Read {
    pub fn new(sequence: impl Into<Vec<u8>>, quality: impl Into<Vec<u8>>) -> Self {
        Self {
            sequence: sequence.into(),
            quality: quality.into(),
            primer: NO_PRIMER,
            trim_color: NO_PRIMER,
            mate: 0,
        }
    }

    pub fn has_primer(&self) -> bool {
        self.primer != NO_PRIMER
    }

    /// Unpaired reads share the mate 1 slot in per-mate summaries.
    pub fn is_mate1_slot(&self) -> bool {
        self.mate < 2
    }
}

/// How the alignment relates to its mate, rendered in YT:Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentType {
    ConcordantPair,
    DiscordantPair,
    /// Mate aligned on its own although the read was paired
    UnpairedFromPair,
    #[default]
    Unpaired,
}

impl AlignmentType {
    pub fn code(self) -> &'static str {
        match self {
            Self::ConcordantPair => "CP",
            Self::DiscordantPair => "DP",
            Self::UnpairedFromPair => "UP",
            Self::Unpaired => "UU",
        }
    }
}

/// Per-record flags set by the aligner.
///
/// The `passed_*` fields record read filters; a read that fails any of them
/// is reported with a YF:Z reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentFlags {
    pub alignment_type: AlignmentType,
    /// Whether the read could have hit the repetitive-alignment ceiling
    pub can_max: bool,
    /// Repetitive when aligned unpaired
    pub maxed: bool,
    /// Repetitive when aligned as a pair
    pub maxed_pair: bool,
    /// Paired alignment with unpaired fallback enabled
    pub mixed_mode: bool,
    pub passed_length: bool,
    pub passed_ns: bool,
    pub passed_score: bool,
    pub passed_qc: bool,
}

impl Default for AlignmentFlags {
    fn default() -> Self {
        Self {
            alignment_type: AlignmentType::default(),
            can_max: false,
            maxed: false,
            maxed_pair: false,
            mixed_mode: false,
            passed_length: true,
            passed_ns: true,
            passed_score: true,
            passed_qc: true,
        }
    }
}

impl AlignmentFlags {
    pub fn new(alignment_type: AlignmentType) -> Self {
        Self {
            alignment_type,
            ..Self::default()
        }
    }

    pub fn part_of_pair(&self) -> bool {
        self.alignment_type != AlignmentType::Unpaired
    }

    pub fn is_mixed_mode(&self) -> bool {
        self.mixed_mode
    }

    pub fn can_max(&self) -> bool {
        self.can_max
    }

    pub fn is_filtered(&self) -> bool {
        self.filter_reason().is_some()
    }

    /// Reason for the first failed filter, checked in order: length, Ns,
    /// score, QC.
    pub fn filter_reason(&self) -> Option<&'static str> {
        if !self.passed_length {
            Some("LN")
        } else if !self.passed_ns {
            Some("NS")
        } else if !self.passed_score {
            Some("SC")
        } else if !self.passed_qc {
            Some("QC")
        } else {
            None
        }
    }

    /// YP:i value
    pub fn paired_repetitive(&self) -> u8 {
        u8::from(self.maxed_pair)
    }

    /// YM:i value
    pub fn unpaired_repetitive(&self) -> u8 {
        u8::from(self.maxed)
    }
}

/// Summary of all alignments found for a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentSetSummary {
    /// Second-best scores for the mate 1 and mate 2 slots
    pub second_best: [Option<i64>; 2],
    /// Whether the read aligned as a pair
    pub paired: bool,
}

impl AlignmentSetSummary {
    pub fn second_best_for(&self, mate1: bool) -> Option<i64> {
        if mate1 {
            self.second_best[0]
        } else {
            self.second_best[1]
        }
    }

    pub fn paired(&self) -> bool {
        self.paired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_type_codes() {
        assert_eq!(AlignmentType::ConcordantPair.code(), "CP");
        assert_eq!(AlignmentType::DiscordantPair.code(), "DP");
        assert_eq!(AlignmentType::UnpairedFromPair.code(), "UP");
        assert_eq!(AlignmentType::Unpaired.code(), "UU");
    }

    #[test]
    fn test_part_of_pair() {
        assert!(!AlignmentFlags::new(AlignmentType::Unpaired).part_of_pair());
        assert!(AlignmentFlags::new(AlignmentType::UnpairedFromPair).part_of_pair());
        assert!(AlignmentFlags::new(AlignmentType::ConcordantPair).part_of_pair());
    }

    #[test]
    fn test_filter_reason_priority() {
        let mut flags = AlignmentFlags::default();
        assert_eq!(flags.filter_reason(), None);
        assert!(!flags.is_filtered());

        flags.passed_qc = false;
        assert_eq!(flags.filter_reason(), Some("QC"));
        flags.passed_score = false;
        assert_eq!(flags.filter_reason(), Some("SC"));
        flags.passed_ns = false;
        assert_eq!(flags.filter_reason(), Some("NS"));
        flags.passed_length = false;
        assert_eq!(flags.filter_reason(), Some("LN"));
        assert!(flags.is_filtered());
    }

    #[test]
    fn test_repetitive_values() {
        let flags = AlignmentFlags {
            maxed_pair: true,
            ..AlignmentFlags::default()
        };
        assert_eq!(flags.paired_repetitive(), 1);
        assert_eq!(flags.unpaired_repetitive(), 0);
    }

    #[test]
    fn test_second_best_slot() {
        let summary = AlignmentSetSummary {
            second_best: [Some(-10), None],
            paired: false,
        };
        let mut read = Read::new("ACGT", "IIII");
        assert!(read.is_mate1_slot());
        assert_eq!(summary.second_best_for(read.is_mate1_slot()), Some(-10));

        read.mate = 2;
        assert!(!read.is_mate1_slot());
        assert_eq!(summary.second_best_for(read.is_mate1_slot()), None);
    }

    #[test]
    fn test_edit_distance_counts_every_entry() {
        let result = AlignmentResult {
            edits: vec![
                EditOp::mismatch(1, b'A', b'G'),
                EditOp::read_gap(4, b'C'),
                EditOp::read_gap(4, b'C'),
            ],
            read_extent: 10,
            ..AlignmentResult::default()
        };
        assert_eq!(result.edit_distance(), 3);
        assert_eq!(result.edit_summary().gap_opens, 1);
    }
}
