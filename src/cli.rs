use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "threatutil")]
#[command(about = "Threat model documentation generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .threatutil.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render threats applying to a target as documentation
    Doc {
        /// Threat store to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Only include threats carrying this applicability label
        #[arg(short, long)]
        target: Option<String>,

        /// Column width for wrapped text
        #[arg(short, long)]
        width: Option<usize>,

        /// Require this identifier prefix (e.g. THREAT)
        #[arg(long = "key-prefix")]
        key_prefix: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export threats from the issue tracker as a threat store
    Export {
        /// Tracker host name
        #[arg(long, env = "THREATUTIL_HOST")]
        host: Option<String>,

        /// Search query selecting the threat issues
        #[arg(short, long)]
        query: Option<String>,

        /// Issues requested per page
        #[arg(long = "page-size")]
        page_size: Option<usize>,

        /// Credentials file (defaults to ~/.netrc)
        #[arg(long)]
        netrc: Option<PathBuf>,

        /// Column width for wrapped text
        #[arg(short, long)]
        width: Option<usize>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_doc_defaults_to_markdown() {
        let cli = Cli::try_parse_from(["threatutil", "doc", "--target", "cloud"]).unwrap();
        match cli.command {
            Commands::Doc { target, format, input, .. } => {
                assert_eq!(target.as_deref(), Some("cloud"));
                assert_eq!(format, OutputFormat::Markdown);
                assert!(input.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from(["threatutil", "doc", "-vv"]).unwrap();
        assert_eq!(cli.verbosity, 2);
    }
}
