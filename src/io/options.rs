/// Output configuration for SAM header and optional fields
use noodles::sam::alignment::record::data::field::Tag;

/// Optional fields this crate can emit, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamTag {
    As,
    Cs,
    Cq,
    Xs,
    Xn,
    Xm,
    Xo,
    Xg,
    Nm,
    Md,
    Ys,
    Yt,
    Yp,
    Ym,
    Yf,
    Yi,
}

impl SamTag {
    /// Every tag, in the order fields are written.
    pub const ALL: [SamTag; 16] = [
        SamTag::As,
        SamTag::Cs,
        SamTag::Cq,
        SamTag::Xs,
        SamTag::Xn,
        SamTag::Xm,
        SamTag::Xo,
        SamTag::Xg,
        SamTag::Nm,
        SamTag::Md,
        SamTag::Ys,
        SamTag::Yt,
        SamTag::Yp,
        SamTag::Ym,
        SamTag::Yf,
        SamTag::Yi,
    ];

    /// Tags written for unaligned reads, when enabled.
    pub const UNALIGNED: [SamTag; 4] = [SamTag::Yt, SamTag::Yp, SamTag::Ym, SamTag::Yf];

    pub fn name(self) -> &'static str {
        match self {
            Self::As => "AS",
            Self::Cs => "CS",
            Self::Cq => "CQ",
            Self::Xs => "XS",
            Self::Xn => "XN",
            Self::Xm => "XM",
            Self::Xo => "XO",
            Self::Xg => "XG",
            Self::Nm => "NM",
            Self::Md => "MD",
            Self::Ys => "YS",
            Self::Yt => "YT",
            Self::Yp => "YP",
            Self::Ym => "YM",
            Self::Yf => "YF",
            Self::Yi => "YI",
        }
    }

    pub fn tag(self) -> Tag {
        match self {
            Self::As => Tag::ALIGNMENT_SCORE,
            Self::Nm => Tag::EDIT_DISTANCE,
            other => {
                let name = other.name().as_bytes();
                Tag::new(name[0], name[1])
            }
        }
    }

    /// SAM value type character
    pub fn value_type(self) -> u8 {
        match self {
            Self::Cs | Self::Cq | Self::Md | Self::Yt | Self::Yf | Self::Yi => b'Z',
            _ => b'i',
        }
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl std::str::FromStr for SamTag {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| format!("unknown SAM attribute '{s}'"))
    }
}

impl std::fmt::Display for SamTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of enabled optional fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSet(u32);

impl TagSet {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        SamTag::ALL.into_iter().collect()
    }

    /// Default tag set of `--outSAMattributes Standard`.
    pub fn standard() -> Self {
        [
            SamTag::As,
            SamTag::Xs,
            SamTag::Xn,
            SamTag::Xm,
            SamTag::Xo,
            SamTag::Xg,
            SamTag::Nm,
            SamTag::Ys,
            SamTag::Yt,
        ]
        .into_iter()
        .collect()
    }

    /// Expand an attribute list: `All`, `None`, `Standard`, or explicit tag
    /// names.
    pub fn from_attributes<S: AsRef<str>>(attrs: &[S]) -> Result<Self, String> {
        match attrs {
            [one] if one.as_ref() == "All" => Ok(Self::all()),
            [one] if one.as_ref() == "None" => Ok(Self::none()),
            [one] if one.as_ref() == "Standard" => Ok(Self::standard()),
            explicit => explicit.iter().map(|s| s.as_ref().parse()).collect(),
        }
    }

    pub fn contains(self, tag: SamTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn insert(&mut self, tag: SamTag) {
        self.0 |= tag.bit();
    }

    pub fn remove(&mut self, tag: SamTag) {
        self.0 &= !tag.bit();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled tags in output order
    pub fn iter(self) -> impl Iterator<Item = SamTag> {
        SamTag::ALL.into_iter().filter(move |&tag| self.contains(tag))
    }
}

impl FromIterator<SamTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = SamTag>>(iter: I) -> Self {
        let mut set = Self::none();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Pre-formatted read group strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadGroup {
    /// `\tID:<id>`, written right after `@RG`
    pub header_id: String,
    /// Remaining `@RG` fields, each with its leading tab
    pub header_body: String,
    /// Per-record field, `RG:Z:<id>`
    pub record_field: String,
}

impl ReadGroup {
    /// `fields` are extra `TAG:VALUE` entries for the `@RG` line, e.g. `SM:sample1`.
    pub fn new<S: AsRef<str>>(id: &str, fields: &[S]) -> Self {
        let header_body = fields
            .iter()
            .map(|f| format!("\t{}", f.as_ref()))
            .collect::<String>();
        Self {
            header_id: format!("\tID:{id}"),
            header_body,
            record_field: format!("RG:Z:{id}"),
        }
    }
}

/// Everything the SAM emitters need to know about the requested output.
///
/// Built once, then shared by reference across all records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamOptions {
    pub tags: TagSet,
    pub print_hd: bool,
    pub print_sq: bool,
    pub print_pg: bool,
    /// Value of VN in the @HD line
    pub hd_version: String,
    pub program_id: String,
    pub program_name: String,
    pub program_version: String,
    pub read_group: Option<ReadGroup>,
}

impl Default for SamOptions {
    fn default() -> Self {
        Self {
            tags: TagSet::all(),
            print_hd: true,
            print_sq: true,
            print_pg: true,
            hd_version: "1.0".to_string(),
            program_id: env!("CARGO_PKG_NAME").to_string(),
            program_name: env!("CARGO_PKG_NAME").to_string(),
            program_version: env!("CARGO_PKG_VERSION").to_string(),
            read_group: None,
        }
    }
}

impl SamOptions {
    pub fn with_tags(tags: TagSet) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    pub fn prints(&self, tag: SamTag) -> bool {
        self.tags.contains(tag)
    }

    /// Per-record read group field, empty when no read group is set
    pub fn read_group_field(&self) -> &str {
        self.read_group
            .as_ref()
            .map_or("", |rg| rg.record_field.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip() {
        for tag in SamTag::ALL {
            assert_eq!(tag.name().parse::<SamTag>(), Ok(tag));
            let noodles_tag = tag.tag();
            let bytes: &[u8; 2] = noodles_tag.as_ref();
            assert_eq!(&bytes[..], tag.name().as_bytes());
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "ZZ".parse::<SamTag>().unwrap_err();
        assert!(err.contains("ZZ"));
    }

    #[test]
    fn test_value_types() {
        assert_eq!(SamTag::As.value_type(), b'i');
        assert_eq!(SamTag::Md.value_type(), b'Z');
        assert_eq!(SamTag::Yp.value_type(), b'i');
        assert_eq!(SamTag::Yi.value_type(), b'Z');
    }

    #[test]
    fn test_tag_set_expansion() {
        assert_eq!(TagSet::from_attributes(&["All"]).unwrap().len(), 16);
        assert!(TagSet::from_attributes(&["None"]).unwrap().is_empty());

        let standard = TagSet::from_attributes(&["Standard"]).unwrap();
        assert_eq!(standard.len(), 9);
        assert!(standard.contains(SamTag::Nm));
        assert!(!standard.contains(SamTag::Md));

        let explicit = TagSet::from_attributes(&["MD", "AS"]).unwrap();
        let names: Vec<_> = explicit.iter().map(SamTag::name).collect();
        assert_eq!(names, vec!["AS", "MD"]);

        assert!(TagSet::from_attributes(&["AS", "All"]).is_err());
    }

    #[test]
    fn test_tag_set_insert_remove() {
        let mut set = TagSet::none();
        set.insert(SamTag::Yf);
        set.insert(SamTag::Yf);
        assert_eq!(set.len(), 1);
        set.remove(SamTag::Yf);
        assert!(set.is_empty());
    }

    #[test]
    fn test_read_group_strings() {
        let rg = ReadGroup::new("grp1", &["SM:sample1", "PL:ILLUMINA"]);
        assert_eq!(rg.header_id, "\tID:grp1");
        assert_eq!(rg.header_body, "\tSM:sample1\tPL:ILLUMINA");
        assert_eq!(rg.record_field, "RG:Z:grp1");
    }

    #[test]
    fn test_default_options() {
        let opts = SamOptions::default();
        assert_eq!(opts.hd_version, "1.0");
        assert!(opts.prints(SamTag::Md));
        assert_eq!(opts.read_group_field(), "");
    }
}
