use crate::core::{KeyedRecord, KeyedRecordView};
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_threats(&mut self, threats: &[KeyedRecord<'_>]) -> anyhow::Result<()> {
        let views: Vec<KeyedRecordView<'_>> = threats.iter().map(KeyedRecordView::from).collect();
        serde_json::to_writer_pretty(&mut self.writer, &views)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
