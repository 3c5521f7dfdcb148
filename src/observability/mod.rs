//! Logging setup and phase tracking.
//!
//! Diagnostics go to stderr so stdout carries only the rendered document.
//! `RUST_LOG` takes precedence; otherwise the level follows the `-v` count.
//!
//! ```ignore
//! use threatutil::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(cli.verbosity);
//!     // ... rest of application
//! }
//! ```

pub mod context;

pub use context::{enter_phase, PhaseGuard, PipelinePhase};

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global stderr subscriber. Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
