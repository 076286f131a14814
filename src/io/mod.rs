pub mod options;
pub mod sam;
pub mod tags;

pub use options::{ReadGroup, SamOptions, SamTag, TagSet};
pub use sam::{write_ref_name, write_ref_name_by_id, SamHeaderWriter};
pub use tags::{AlignedRecord, FieldSeparator, OptionalFieldWriter};
