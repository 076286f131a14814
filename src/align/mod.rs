pub mod edit;
pub mod md;
pub mod result;

// Re-export commonly used types
pub use edit::{summarize_edits, EditKind, EditOp, EditSummary};
pub use md::{MdOp, MdScratch};
pub use result::{
    AlignmentFlags, AlignmentResult, AlignmentSetSummary, AlignmentType, Read, NO_PRIMER,
};
