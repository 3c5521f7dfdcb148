//! Markdown writer for threat documentation.
//!
//! Each record becomes one section:
//!
//! ```text
//! ## THREAT-3: Summary line
//! Wrapped description text.
//!
//! ### Threat Response
//! Wrapped response text.
//!
//! ```
//!
//! The response, security requirement and impact sections are emitted in
//! that order and only when the field is non-empty.

use crate::core::KeyedRecord;
use crate::formatting::{render_field, wrap};
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, width: usize) -> Self {
        Self { writer, width }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_section(&mut self, keyed: &KeyedRecord<'_>) -> anyhow::Result<()> {
        let record = keyed.record;
        writeln!(self.writer, "## {}: {}", keyed.key, record.summary)?;

        let body = wrap(&record.description, self.width);
        if !body.is_empty() {
            writeln!(self.writer, "{body}")?;
        }
        writeln!(self.writer)?;

        record
            .labeled_fields()
            .iter()
            .try_for_each(|(label, text)| {
                self.writer
                    .write_all(render_field(label, text, self.width).as_bytes())
            })?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_threats(&mut self, threats: &[KeyedRecord<'_>]) -> anyhow::Result<()> {
        threats
            .iter()
            .try_for_each(|keyed| self.write_section(keyed))?;
        self.writer.flush()?;
        Ok(())
    }
}
