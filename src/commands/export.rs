use crate::core::ThreatRecord;
use crate::io::open_output;
use crate::io::writers::YamlWriter;
use crate::observability::{enter_phase, PipelinePhase};
use crate::sync::{credentials_for, fetch_all, to_entries, FieldMap, IssueSource, JiraClient};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub host: String,
    pub query: String,
    pub page_size: usize,
    pub timeout: Duration,
    pub netrc: PathBuf,
    pub fields: FieldMap,
    pub width: usize,
    pub output: Option<PathBuf>,
}

pub fn handle_export(config: ExportConfig) -> Result<()> {
    let credentials = credentials_for(&config.netrc, &config.host)?;
    let client = JiraClient::new(&config.host, credentials, config.timeout)?
        .with_fields(config.fields.requested_fields());

    let entries = fetch_entries(&client, &config)?;
    let writer = open_output(config.output.as_deref())?;
    write_entries(&entries, &config, writer)?;

    info!("Exported {} threats from {}", entries.len(), config.host);
    Ok(())
}

/// Fetch every matching issue from `source` and map it onto threat records.
pub fn fetch_entries<S>(source: &S, config: &ExportConfig) -> Result<Vec<(String, ThreatRecord)>>
where
    S: IssueSource + ?Sized,
{
    let issues = {
        let _phase = enter_phase(PipelinePhase::Fetching);
        fetch_all(source, &config.query, config.page_size)
            .with_context(|| format!("Failed to query {}", config.host))?
    };

    let _phase = enter_phase(PipelinePhase::Mapping);
    Ok(to_entries(&issues, &config.fields)?)
}

/// Write mapped entries as a loadable threat store.
pub fn write_entries<W: Write>(
    entries: &[(String, ThreatRecord)],
    config: &ExportConfig,
    writer: W,
) -> Result<()> {
    let _phase = enter_phase(PipelinePhase::Rendering);
    YamlWriter::new(writer, config.width)
        .with_header(format!("Exported from {} by threatutil", config.host))
        .write_store(entries)?;
    Ok(())
}

/// Fetch from `source` and write the resulting threat store to `writer`.
pub fn export_from<S, W>(source: &S, config: &ExportConfig, writer: W) -> Result<usize>
where
    S: IssueSource + ?Sized,
    W: Write,
{
    let entries = fetch_entries(source, config)?;
    write_entries(&entries, config, writer)?;
    Ok(entries.len())
}
