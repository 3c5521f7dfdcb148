//! Record store loading.
//!
//! The threat store is a YAML mapping of identifier to record fields, read
//! once per run. Loading performs structural parsing only: identifiers are
//! not checked here, that happens when records are put in key order.

use crate::core::ThreatStore;
use crate::errors::{Result, ThreatError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Parse a threat store from any byte source.
pub fn load_store<R: Read>(mut reader: R) -> Result<ThreatStore> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_store(&buf)
}

/// Parse a threat store from raw bytes.
pub fn parse_store(bytes: &[u8]) -> Result<ThreatStore> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ThreatStore::new());
    }

    serde_yaml::from_slice::<ThreatStore>(bytes).map_err(|e| ThreatError::parse(e.to_string()))
}

/// Open and parse the threat store at `path`.
pub fn load_store_from_path(path: &Path) -> Result<ThreatStore> {
    let file = File::open(path).map_err(|e| ThreatError::io(path, e))?;
    let store = load_store(BufReader::new(file)).map_err(|e| e.with_path(path))?;
    debug!("Loaded {} threats from {}", store.len(), path.display());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use indoc::indoc;

    #[test]
    fn test_load_store_reads_short_field_names() {
        let yaml = indoc! {"
            THREAT-1:
              summary: Firmware rollback
              applies: [sensor, gateway]
              desc: An attacker installs older firmware.
              resp: Monotonic version counter.
              sec: Reject images below the counter.
              imp: Reintroduces fixed vulnerabilities.
        "};

        let store = load_store(yaml.as_bytes()).unwrap();
        let record = &store["THREAT-1"];
        assert_eq!(record.summary, "Firmware rollback");
        assert_eq!(record.applies, vec!["sensor", "gateway"]);
        assert_eq!(record.description, "An attacker installs older firmware.");
        assert_eq!(record.response, "Monotonic version counter.");
        assert_eq!(record.security_requirement, "Reject images below the counter.");
        assert_eq!(record.impact, "Reintroduces fixed vulnerabilities.");
    }

    #[test]
    fn test_missing_optional_fields_default_to_empty() {
        let store = load_store("THREAT-2:\n  summary: Only a summary\n".as_bytes()).unwrap();
        let record = &store["THREAT-2"];
        assert!(record.applies.is_empty());
        assert!(record.description.is_empty());
        assert!(record.impact.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let yaml = "THREAT-3:\n  summary: s\n  owner: someone\n  cvss: 7.1\n";
        let store = load_store(yaml.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_input_is_empty_store() {
        assert!(load_store("".as_bytes()).unwrap().is_empty());
        assert!(load_store("\n  \n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = load_store("THREAT-1: [unclosed".as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PARSE);
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let err = load_store("- just\n- a list\n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PARSE);

        let err = load_store("THREAT-1:\n  applies: [sensor]\n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PARSE);
    }

    #[test]
    fn test_missing_file_is_io_error_with_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("threats.yaml");

        let err = load_store_from_path(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IO);
        assert!(err.to_string().contains("threats.yaml"));
    }

    #[test]
    fn test_parse_error_from_file_names_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sensor.yaml");
        std::fs::write(&path, "THREAT-1: {summary: [").unwrap();

        let err = load_store_from_path(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PARSE);
        assert!(err.to_string().contains("sensor.yaml"));
    }
}
