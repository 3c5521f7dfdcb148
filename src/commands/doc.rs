use crate::io::{open_output, OutputFormat};
use crate::observability::{enter_phase, PipelinePhase};
use crate::render::{select_threats, write_document, RenderOptions};
use crate::store::load_store_from_path;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct DocConfig {
    pub input: PathBuf,
    pub options: RenderOptions,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_doc(config: DocConfig) -> Result<()> {
    let store = {
        let _phase = enter_phase(PipelinePhase::Loading);
        load_store_from_path(&config.input)?
    };

    // Select before opening the destination so a failed run leaves an
    // existing output file untouched.
    let selected = select_threats(&store, &config.options)?;
    let writer = open_output(config.output.as_deref())?;
    write_document(&selected, config.format, config.options.width, writer)?;
    let count = selected.len();

    info!(
        "Rendered {} of {} threats for '{}'",
        count,
        store.len(),
        config.options.target
    );
    Ok(())
}
