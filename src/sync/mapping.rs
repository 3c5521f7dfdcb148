//! Mapping tracker issues onto threat records.

use super::client::RemoteIssue;
use crate::core::ThreatRecord;
use crate::errors::{Result, ThreatError};
use serde_json::{Map, Value};

/// Result of looking up a field on a remote issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomField<'a> {
    Absent,
    Text(&'a str),
    /// Present with a non-string value; carries the JSON type name.
    Other(&'static str),
}

/// Look up `key` in an issue's field map. JSON `null` counts as absent.
pub fn custom_field<'a>(fields: &'a Map<String, Value>, key: &str) -> CustomField<'a> {
    match fields.get(key) {
        None | Some(Value::Null) => CustomField::Absent,
        Some(Value::String(s)) => CustomField::Text(s),
        Some(other) => CustomField::Other(type_name(other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Names of the tracker fields holding each threat attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub response: String,
    pub security: String,
    pub impact: String,
    pub labels_as_applies: bool,
}

impl FieldMap {
    /// Every field the mapping reads, for restricting search responses.
    pub fn requested_fields(&self) -> Vec<String> {
        let mut fields = vec![
            "summary".to_string(),
            "description".to_string(),
            self.response.clone(),
            self.security.clone(),
            self.impact.clone(),
        ];
        if self.labels_as_applies {
            fields.push("labels".to_string());
        }
        fields
    }
}

fn text_field(issue: &RemoteIssue, key: &str) -> Result<String> {
    match custom_field(&issue.fields, key) {
        CustomField::Absent => Ok(String::new()),
        CustomField::Text(s) => Ok(s.to_string()),
        CustomField::Other(found) => Err(ThreatError::UnexpectedType {
            issue: issue.key.clone(),
            field: key.to_string(),
            found,
        }),
    }
}

fn labels(issue: &RemoteIssue) -> Result<Vec<String>> {
    let unexpected = |found: &'static str| ThreatError::UnexpectedType {
        issue: issue.key.clone(),
        field: "labels".to_string(),
        found,
    };

    match issue.fields.get("labels") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(unexpected(type_name(other))),
            })
            .collect(),
        Some(other) => Err(unexpected(type_name(other))),
    }
}

/// Convert one issue into a threat record.
pub fn to_threat(issue: &RemoteIssue, map: &FieldMap) -> Result<ThreatRecord> {
    Ok(ThreatRecord {
        summary: text_field(issue, "summary")?,
        applies: if map.labels_as_applies {
            labels(issue)?
        } else {
            Vec::new()
        },
        description: text_field(issue, "description")?,
        response: text_field(issue, &map.response)?,
        security_requirement: text_field(issue, &map.security)?,
        impact: text_field(issue, &map.impact)?,
    })
}

/// Convert issues into keyed entries, preserving their order.
pub fn to_entries(issues: &[RemoteIssue], map: &FieldMap) -> Result<Vec<(String, ThreatRecord)>> {
    issues
        .iter()
        .map(|issue| to_threat(issue, map).map(|record| (issue.key.clone(), record)))
        .collect()
}
