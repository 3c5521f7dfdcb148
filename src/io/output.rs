use crate::core::KeyedRecord;
use crate::io::writers::{JsonWriter, MarkdownWriter};
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown sections for inclusion in a document
    Markdown,
    /// JSON array of the selected records
    Json,
}

pub trait OutputWriter {
    /// Write the records, already ordered and filtered.
    fn write_threats(&mut self, threats: &[KeyedRecord<'_>]) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
    width: usize,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer, width)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}
