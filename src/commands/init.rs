use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# threatutil configuration

[render]
input = "threats.yaml"
target = "sensor"
width = 65
# key_prefix = "THREAT"

[remote]
# host = "jira.example.org"
# query = "project = TM AND issuetype = Threat"
page_size = 50
timeout_secs = 30
response_field = "customfield_10500"
security_field = "customfield_10501"
impact_field = "customfield_10502"
labels_as_applies = true

# credentials_file = "/home/me/.netrc"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_at(Path::new(CONFIG_FILE_NAME), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(config_path, DEFAULT_CONFIG)
}
