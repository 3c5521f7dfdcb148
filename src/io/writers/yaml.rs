//! YAML writer producing a loadable threat store.
//!
//! Used by `export` to turn issue-tracker records into a `threats.yaml`
//! file. Long-form fields are written as literal block scalars holding the
//! wrapped text, one indented line per wrapped line, so the file stays
//! readable in review and loads back unchanged apart from line breaks.

use crate::core::ThreatRecord;
use crate::formatting::render_indented;
use std::io::Write;

const FIELD_INDENT: &str = "  ";
const BLOCK_INDENT: &str = "    ";

pub struct YamlWriter<W: Write> {
    writer: W,
    width: usize,
    header: Option<String>,
}

impl<W: Write> YamlWriter<W> {
    pub fn new(writer: W, width: usize) -> Self {
        Self {
            writer,
            width,
            header: None,
        }
    }

    /// Emit `header` as a leading comment line.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write all entries in the order given.
    pub fn write_store(&mut self, entries: &[(String, ThreatRecord)]) -> anyhow::Result<()> {
        if let Some(header) = &self.header {
            writeln!(self.writer, "# {header}")?;
            writeln!(self.writer)?;
        }
        entries
            .iter()
            .try_for_each(|(key, record)| self.write_entry(key, record))?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_entry(&mut self, key: &str, record: &ThreatRecord) -> anyhow::Result<()> {
        writeln!(self.writer, "{}:", quoted(key)?)?;
        writeln!(
            self.writer,
            "{FIELD_INDENT}summary: {}",
            quoted(&record.summary)?
        )?;

        if !record.applies.is_empty() {
            writeln!(self.writer, "{FIELD_INDENT}applies:")?;
            for label in &record.applies {
                writeln!(self.writer, "{FIELD_INDENT}- {}", quoted(label)?)?;
            }
        }

        let blocks = [
            ("desc", record.description.as_str()),
            ("resp", record.response.as_str()),
            ("sec", record.security_requirement.as_str()),
            ("imp", record.impact.as_str()),
        ];
        for (name, text) in blocks {
            self.write_block(name, text)?;
        }
        Ok(())
    }

    fn write_block(&mut self, name: &str, text: &str) -> anyhow::Result<()> {
        let body = render_indented(text, BLOCK_INDENT, self.width);
        if body.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{FIELD_INDENT}{name}: |-")?;
        self.writer.write_all(body.as_bytes())?;
        Ok(())
    }
}

/// Double-quoted scalar; JSON string syntax is valid YAML.
fn quoted(value: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::load_store;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn render(entries: &[(String, ThreatRecord)], width: usize) -> String {
        let mut writer = YamlWriter::new(Vec::new(), width);
        writer.write_store(entries).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_layout_uses_block_scalars() {
        let record = ThreatRecord {
            summary: "Replay: old command accepted".into(),
            applies: vec!["sensor".into()],
            description: "Commands carry no nonce so a captured one can be replayed.".into(),
            impact: "Medium".into(),
            ..ThreatRecord::default()
        };

        let expected = indoc! {r#"
            "TM-4":
              summary: "Replay: old command accepted"
              applies:
              - "sensor"
              desc: |-
                Commands carry no nonce so a
                captured one can be replayed.
              imp: |-
                Medium
        "#};
        assert_eq!(render(&[("TM-4".into(), record)], 30), expected);
    }

    #[test]
    fn test_output_loads_back_as_store() {
        let entries = vec![
            (
                "TM-2".to_string(),
                ThreatRecord {
                    summary: "Quotes \"and\" colons: here".into(),
                    description: "# not a comment, just text".into(),
                    response: "line one\nline two".into(),
                    ..ThreatRecord::default()
                },
            ),
            ("TM-1".to_string(), ThreatRecord::new("Bare")),
        ];

        let store = load_store(render(&entries, 65).as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store["TM-2"].summary, "Quotes \"and\" colons: here");
        assert_eq!(store["TM-2"].description, "# not a comment, just text");
        assert_eq!(store["TM-2"].response, "line one line two");
        assert_eq!(store["TM-1"].summary, "Bare");
        assert!(store["TM-1"].description.is_empty());
    }

    #[test]
    fn test_header_is_a_comment() {
        let mut writer = YamlWriter::new(Vec::new(), 65).with_header("Exported from jira.example.org");
        writer.write_store(&[]).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "# Exported from jira.example.org\n\n");
        assert!(load_store(out.as_bytes()).unwrap().is_empty());
    }
}
