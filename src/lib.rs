pub mod align;
pub mod error;
pub mod genome;
pub mod io;
pub mod params;

use std::io::{BufWriter, Write};

use log::info;

use crate::genome::RefCatalog;
use crate::io::SamHeaderWriter;
use crate::params::Parameters;

/// Top-level dispatcher. Called from `main()` after CLI parsing.
pub fn run(params: &Parameters) -> anyhow::Result<()> {
    params.validate()?;

    info!("samtags v{}", env!("CARGO_PKG_VERSION"));
    info!("refList: {}", params.ref_list.display());
    info!("outSAMattributes: {:?}", params.out_sam_attributes);

    let catalog = RefCatalog::from_fai(&params.ref_list)?;
    info!("Loaded {} reference sequences", catalog.len());

    let options = params.sam_options()?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    SamHeaderWriter::new(&catalog, &options).write(&mut out)?;
    out.flush()?;

    Ok(())
}
