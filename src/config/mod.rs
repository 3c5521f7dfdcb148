//! Configuration from `.threatutil.toml`.
//!
//! The file is optional. When present in the working directory or one of
//! its ancestors it supplies defaults that command-line flags override.

mod core;
mod loader;

pub use self::core::{RemoteConfig, RenderConfig, ThreatutilConfig};
pub use loader::{
    directory_ancestors, find_config, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
