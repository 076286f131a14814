use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::io::options::{ReadGroup, SamOptions, TagSet};

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// samtags command-line parameters, using aligner-style `--camelCase` names.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "samtags",
    about = "Print the SAM header for a reference list",
    version
)]
pub struct Parameters {
    // ── Input ───────────────────────────────────────────────────────────
    /// Reference list: FASTA index (.fai) or chrom sizes file
    #[arg(long = "refList")]
    pub ref_list: PathBuf,

    // ── SAM header ──────────────────────────────────────────────────────
    /// Omit the @HD line
    #[arg(long = "outSAMnoHD")]
    pub out_sam_no_hd: bool,

    /// Omit the @SQ lines
    #[arg(long = "outSAMnoSQ")]
    pub out_sam_no_sq: bool,

    /// Omit the @PG line
    #[arg(long = "outSAMnoPG")]
    pub out_sam_no_pg: bool,

    /// Format version written in the @HD line
    #[arg(long = "outSAMversion", default_value = "1.0")]
    pub out_sam_version: String,

    /// Read group ID for the @RG line and per-record RG:Z field
    #[arg(long = "outSAMreadGroupID")]
    pub out_sam_read_group_id: Option<String>,

    /// Extra @RG fields as TAG:VALUE, e.g. SM:sample1 PL:ILLUMINA
    #[arg(long = "outSAMreadGroup", num_args = 1..)]
    pub out_sam_read_group: Vec<String>,

    // ── SAM records ─────────────────────────────────────────────────────
    /// SAM attributes to include (Standard, All, None, or explicit list)
    #[arg(long = "outSAMattributes", num_args = 1.., default_values_t = vec!["Standard".to_string()])]
    pub out_sam_attributes: Vec<String>,
}

impl Parameters {
    /// Expand `--outSAMattributes` into the enabled tag set.
    pub fn sam_tag_set(&self) -> Result<TagSet, String> {
        TagSet::from_attributes(&self.out_sam_attributes)
    }

    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        self.sam_tag_set().map_err(Error::Parameter)?;

        if let Some(id) = &self.out_sam_read_group_id {
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(Error::Parameter(format!(
                    "--outSAMreadGroupID must be a non-empty word, got '{id}'"
                )));
            }
        } else if !self.out_sam_read_group.is_empty() {
            return Err(Error::Parameter(
                "--outSAMreadGroup requires --outSAMreadGroupID".into(),
            ));
        }

        for field in &self.out_sam_read_group {
            let bytes = field.as_bytes();
            if bytes.len() < 4 || bytes[2] != b':' || field.contains('\t') {
                return Err(Error::Parameter(format!(
                    "read group field '{field}' is not of the form TAG:VALUE"
                )));
            }
        }

        if self.out_sam_version.is_empty() {
            return Err(Error::Parameter("--outSAMversion must not be empty".into()));
        }

        Ok(())
    }

    /// Build the output options for the SAM emitters.
    pub fn sam_options(&self) -> Result<SamOptions, Error> {
        let tags = self.sam_tag_set().map_err(Error::Parameter)?;
        let read_group = self
            .out_sam_read_group_id
            .as_deref()
            .map(|id| ReadGroup::new(id, &self.out_sam_read_group));

        Ok(SamOptions {
            tags,
            print_hd: !self.out_sam_no_hd,
            print_sq: !self.out_sam_no_sq,
            print_pg: !self.out_sam_no_pg,
            hd_version: self.out_sam_version.clone(),
            read_group,
            ..SamOptions::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
