use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One threat entry from the threat model.
///
/// Field names on disk follow the short names used in `threats.yaml`
/// (`desc`, `resp`, `sec`, `imp`). Every field except `summary` may be
/// absent and defaults to empty; unknown fields are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreatRecord {
    pub summary: String,
    #[serde(default)]
    pub applies: Vec<String>,
    #[serde(default, rename = "desc")]
    pub description: String,
    #[serde(default, rename = "resp")]
    pub response: String,
    #[serde(default, rename = "sec")]
    pub security_requirement: String,
    #[serde(default, rename = "imp")]
    pub impact: String,
}

impl ThreatRecord {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn with_applies<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applies = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Optional long-form fields in rendering order, paired with their labels.
    pub fn labeled_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("Threat Response", self.response.as_str()),
            ("Security Requirement", self.security_requirement.as_str()),
            ("Impact", self.impact.as_str()),
        ]
    }
}

/// Identifier to record mapping, read once per run.
///
/// Backed by a `BTreeMap` so iteration is lexicographic by identifier;
/// key ordering relies on this to break numeric ties deterministically.
pub type ThreatStore = BTreeMap<String, ThreatRecord>;

/// An identifier paired with its record for the duration of a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyedRecord<'a> {
    pub key: &'a str,
    pub number: u64,
    pub record: &'a ThreatRecord,
}

/// Serializable view of a keyed record for machine-readable output.
#[derive(Debug, Serialize)]
pub struct KeyedRecordView<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub record: &'a ThreatRecord,
}

impl<'a> From<&KeyedRecord<'a>> for KeyedRecordView<'a> {
    fn from(keyed: &KeyedRecord<'a>) -> Self {
        Self {
            id: keyed.key,
            record: keyed.record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_fields_follow_render_order() {
        let record = ThreatRecord {
            response: "r".into(),
            security_requirement: "s".into(),
            impact: "i".into(),
            ..ThreatRecord::new("x")
        };

        let labels: Vec<_> = record.labeled_fields().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["Threat Response", "Security Requirement", "Impact"]
        );
    }

    #[test]
    fn test_view_flattens_record_with_short_names() {
        let record = ThreatRecord::new("Spoofed update").with_applies(["sensor"]);
        let keyed = KeyedRecord {
            key: "THREAT-4",
            number: 4,
            record: &record,
        };

        let json = serde_json::to_value(KeyedRecordView::from(&keyed)).unwrap();
        assert_eq!(json["id"], "THREAT-4");
        assert_eq!(json["summary"], "Spoofed update");
        assert_eq!(json["applies"][0], "sensor");
        assert_eq!(json["desc"], "");
    }
}
