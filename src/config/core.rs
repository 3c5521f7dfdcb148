use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::formatting::DEFAULT_WIDTH;

/// Root configuration structure for threatutil
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThreatutilConfig {
    /// Documentation rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Issue tracker export settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Credentials file, defaults to `~/.netrc`
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Threat store to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Applicability label records must carry to be rendered
    #[serde(default = "default_target")]
    pub target: String,

    /// Column width for wrapped text
    #[serde(default = "default_width")]
    pub width: usize,

    /// Required identifier prefix; any alphabetic prefix when unset
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            target: default_target(),
            width: default_width(),
            key_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteConfig {
    /// Tracker host name, also the credentials lookup key
    #[serde(default)]
    pub host: Option<String>,

    /// Search query selecting the threat issues
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_response_field")]
    pub response_field: String,

    #[serde(default = "default_security_field")]
    pub security_field: String,

    #[serde(default = "default_impact_field")]
    pub impact_field: String,

    /// Map issue labels onto applicability labels
    #[serde(default = "default_labels_as_applies")]
    pub labels_as_applies: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: None,
            query: None,
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            response_field: default_response_field(),
            security_field: default_security_field(),
            impact_field: default_impact_field(),
            labels_as_applies: default_labels_as_applies(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("threats.yaml")
}

fn default_target() -> String {
    "sensor".to_string()
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_page_size() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_response_field() -> String {
    "customfield_10500".to_string()
}

fn default_security_field() -> String {
    "customfield_10501".to_string()
}

fn default_impact_field() -> String {
    "customfield_10502".to_string()
}

fn default_labels_as_applies() -> bool {
    true
}

impl ThreatutilConfig {
    /// Check values serde cannot constrain.
    pub fn validate(&self) -> Result<(), String> {
        if self.render.width == 0 {
            return Err("render.width must be greater than 0".to_string());
        }
        if self.remote.page_size == 0 {
            return Err("remote.page_size must be greater than 0".to_string());
        }
        if self.render.target.is_empty() {
            return Err("render.target must not be empty".to_string());
        }
        Ok(())
    }
}
