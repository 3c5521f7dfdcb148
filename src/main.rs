use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use threatutil::cli::{Cli, Commands};
use threatutil::commands::doc::DocConfig;
use threatutil::commands::export::ExportConfig;
use threatutil::config::{load_config, load_config_from, ThreatutilConfig};
use threatutil::formatting::{error_line, ColorMode};
use threatutil::io::OutputFormat;
use threatutil::observability::init_tracing;
use threatutil::render::RenderOptions;
use threatutil::sync::{default_netrc_path, FieldMap};

// Single point of process termination: every error ends up here
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_line(ColorMode::from_env(), &format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => threatutil::commands::init::init_config(force),
        Commands::Doc {
            input,
            target,
            width,
            key_prefix,
            format,
            output,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            let doc_config = build_doc_config(config, input, target, width, key_prefix, format, output)?;
            threatutil::commands::doc::handle_doc(doc_config)
        }
        Commands::Export {
            host,
            query,
            page_size,
            netrc,
            width,
            output,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            let export_config = build_export_config(config, host, query, page_size, netrc, width, output)?;
            threatutil::commands::export::handle_export(export_config)
        }
    }
}

// An explicit --config must load; a discovered one falls back to defaults
fn resolve_config(path: Option<&std::path::Path>) -> Result<ThreatutilConfig> {
    match path {
        Some(path) => Ok(load_config_from(path)?),
        None => Ok(load_config()),
    }
}

// Pure function: CLI flags override file values
fn build_doc_config(
    mut config: ThreatutilConfig,
    input: Option<PathBuf>,
    target: Option<String>,
    width: Option<usize>,
    key_prefix: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<DocConfig> {
    if let Some(input) = input {
        config.render.input = input;
    }
    if let Some(target) = target {
        config.render.target = target;
    }
    if let Some(width) = width {
        config.render.width = width;
    }
    if key_prefix.is_some() {
        config.render.key_prefix = key_prefix;
    }
    validate(&config)?;

    Ok(DocConfig {
        input: config.render.input,
        options: RenderOptions {
            target: config.render.target,
            width: config.render.width,
            key_prefix: config.render.key_prefix,
        },
        format,
        output,
    })
}

// Pure function: CLI flags override file values
fn build_export_config(
    mut config: ThreatutilConfig,
    host: Option<String>,
    query: Option<String>,
    page_size: Option<usize>,
    netrc: Option<PathBuf>,
    width: Option<usize>,
    output: Option<PathBuf>,
) -> Result<ExportConfig> {
    if let Some(page_size) = page_size {
        config.remote.page_size = page_size;
    }
    if let Some(width) = width {
        config.render.width = width;
    }
    validate(&config)?;

    let remote = config.remote;
    let host = host
        .or(remote.host)
        .context("No tracker host given; use --host or set remote.host")?;
    let query = query
        .or(remote.query)
        .context("No search query given; use --query or set remote.query")?;
    let netrc = netrc
        .or(config.credentials_file)
        .or_else(default_netrc_path)
        .context("Cannot locate credentials file; use --netrc")?;

    Ok(ExportConfig {
        host,
        query,
        page_size: remote.page_size,
        timeout: Duration::from_secs(remote.timeout_secs),
        netrc,
        fields: FieldMap {
            response: remote.response_field,
            security: remote.security_field,
            impact: remote.impact_field,
            labels_as_applies: remote.labels_as_applies,
        },
        width: config.render.width,
        output,
    })
}

fn validate(config: &ThreatutilConfig) -> Result<()> {
    config
        .validate()
        .map_err(|message| threatutil::ThreatError::config(message, None))?;
    Ok(())
}
