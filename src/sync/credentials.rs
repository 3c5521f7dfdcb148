//! Credential lookup from a netrc-style file.
//!
//! Only `machine` entries are considered and the host must match exactly;
//! a `default` entry never satisfies a lookup. `macdef` bodies are skipped
//! up to the next blank line.

use crate::errors::{Result, ThreatError};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Entry {
    machine: Option<String>,
    login: Option<String>,
    password: Option<String>,
}

/// Default location of the credentials file, `~/.netrc`.
pub fn default_netrc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".netrc"))
}

fn parse_entries(contents: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;
    let mut pending: Option<&str> = None;
    let mut in_macdef = false;

    for line in contents.lines() {
        if in_macdef {
            if line.trim().is_empty() {
                in_macdef = false;
            }
            continue;
        }

        for token in line.split_whitespace() {
            if let Some(keyword) = pending.take() {
                if let Some(entry) = current.as_mut() {
                    let value = Some(token.to_string());
                    match keyword {
                        "machine" => entry.machine = value,
                        "login" => entry.login = value,
                        "password" => entry.password = value,
                        _ => {}
                    }
                }
                continue;
            }

            match token {
                "machine" => {
                    entries.extend(current.take());
                    current = Some(Entry::default());
                    pending = Some("machine");
                }
                "default" => {
                    entries.extend(current.take());
                    current = Some(Entry::default());
                }
                "login" | "password" | "account" => pending = Some(token),
                "macdef" => {
                    in_macdef = true;
                    break;
                }
                _ => {}
            }
        }
    }

    entries.extend(current);
    entries
}

/// Find the credentials for `host` in netrc-formatted `contents`.
pub fn lookup(contents: &str, host: &str) -> Option<Credentials> {
    parse_entries(contents)
        .into_iter()
        .find(|entry| entry.machine.as_deref() == Some(host))
        .map(|entry| Credentials {
            login: entry.login.unwrap_or_default(),
            password: entry.password.unwrap_or_default(),
        })
}

/// Read the credentials file at `path` and resolve `host`.
pub fn credentials_for(path: &Path, host: &str) -> Result<Credentials> {
    let contents = std::fs::read_to_string(path).map_err(|e| ThreatError::io(path, e))?;
    let creds = lookup(&contents, host).ok_or_else(|| ThreatError::CredentialNotFound {
        host: host.to_string(),
        path: path.to_path_buf(),
    })?;
    debug!("Using credentials for {} as {}", host, creds.login);
    Ok(creds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use indoc::indoc;

    const NETRC: &str = indoc! {"
        machine api.github.com login octo password gh-token

        macdef init
        machine jira.example.org login evil password evil

        machine jira.example.org
            login alice
            password s3cret
        default login anonymous password guest
    "};

    #[test]
    fn test_lookup_exact_host() {
        let creds = lookup(NETRC, "jira.example.org").unwrap();
        assert_eq!(creds.login, "alice");
        assert_eq!(creds.password, "s3cret");

        let creds = lookup(NETRC, "api.github.com").unwrap();
        assert_eq!(creds.login, "octo");
    }

    #[test]
    fn test_lookup_ignores_default_and_partial_hosts() {
        assert!(lookup(NETRC, "example.org").is_none());
        assert!(lookup(NETRC, "jira.example.org.evil").is_none());
        assert!(lookup(NETRC, "unknown").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = lookup(NETRC, "jira.example.org").unwrap();
        let shown = format!("{creds:?}");
        assert!(shown.contains("alice"));
        assert!(!shown.contains("s3cret"));
    }

    #[test]
    fn test_credentials_for_missing_host_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("netrc");
        std::fs::write(&path, NETRC).unwrap();

        let err = credentials_for(&path, "nope.example.org").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CREDENTIAL_NOT_FOUND);
    }

    #[test]
    fn test_credentials_for_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = credentials_for(&dir.path().join("absent"), "host").unwrap_err();
        assert_eq!(err.code(), ErrorCode::IO);
    }
}
