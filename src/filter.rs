//! Applicability filtering.

use crate::core::{KeyedRecord, ThreatRecord};

/// True iff `label` is one of the record's applicability labels.
///
/// Matching is exact and case-sensitive.
pub fn applies_to(record: &ThreatRecord, label: &str) -> bool {
    record.applies.iter().any(|ap| ap == label)
}

/// Keep only the records that apply to `label`, preserving order.
pub fn filter_applicable<'a>(records: Vec<KeyedRecord<'a>>, label: &str) -> Vec<KeyedRecord<'a>> {
    records
        .into_iter()
        .filter(|keyed| applies_to(keyed.record, label))
        .collect()
}
