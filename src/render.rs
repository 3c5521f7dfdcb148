//! Documentation pipeline: order, filter, write.
//!
//! Ordering runs over the whole store before anything is written, so a
//! malformed identifier fails the run with no partial document.

use crate::core::{KeyedRecord, ThreatStore};
use crate::filter::filter_applicable;
use crate::formatting::DEFAULT_WIDTH;
use crate::io::{create_writer, OutputFormat};
use crate::observability::{enter_phase, PipelinePhase};
use crate::ordering::{order_records, KeyPattern};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub target: String,
    pub width: usize,
    pub key_prefix: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target: "sensor".to_string(),
            width: DEFAULT_WIDTH,
            key_prefix: None,
        }
    }
}

impl RenderOptions {
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}

/// Records applying to the target, in key order.
pub fn select_threats<'a>(
    store: &'a ThreatStore,
    options: &RenderOptions,
) -> crate::errors::Result<Vec<KeyedRecord<'a>>> {
    let _phase = enter_phase(PipelinePhase::Ordering);
    let pattern = KeyPattern::new(options.key_prefix.as_deref())?;
    let ordered = order_records(&pattern, store)?;
    let selected = filter_applicable(ordered, &options.target);
    debug!(
        "{} of {} threats apply to '{}'",
        selected.len(),
        store.len(),
        options.target
    );
    Ok(selected)
}

/// Write already selected records in `format`.
pub fn write_document<'w>(
    selected: &[KeyedRecord<'_>],
    format: OutputFormat,
    width: usize,
    writer: Box<dyn Write + 'w>,
) -> anyhow::Result<()> {
    let _phase = enter_phase(PipelinePhase::Rendering);
    let mut output = create_writer(format, writer, width);
    output.write_threats(selected)
}

/// Render the selected records in `format`; returns how many were written.
pub fn render_document<'w>(
    store: &ThreatStore,
    options: &RenderOptions,
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
) -> anyhow::Result<usize> {
    let selected = select_threats(store, options)?;
    write_document(&selected, format, options.width, writer)?;
    Ok(selected.len())
}

/// Render the Markdown document to a string.
pub fn render_markdown(store: &ThreatStore, options: &RenderOptions) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    render_document(store, options, OutputFormat::Markdown, Box::new(&mut buf))?;
    Ok(String::from_utf8(buf)?)
}
