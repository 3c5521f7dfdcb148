//! Key ordering.
//!
//! Threat identifiers are issue-tracker style keys of the form
//! `PREFIX-NNN`. Records are presented in ascending order of the numeric
//! part, so `THREAT-9` comes before `THREAT-10`. A key that does not match
//! the pattern aborts the whole ordering; nothing is silently skipped.

use crate::core::{KeyedRecord, ThreatRecord};
use crate::errors::{Result, ThreatError};
use regex::Regex;
use tracing::warn;

/// Compiled key pattern, anchored at both ends.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    regex: Regex,
    expected: String,
}

impl KeyPattern {
    /// Build a pattern accepting `prefix` only, or any alphabetic prefix
    /// when `prefix` is `None`.
    pub fn new(prefix: Option<&str>) -> Result<Self> {
        let (source, expected) = match prefix {
            None => (
                "^[A-Za-z]+-([0-9]+)$".to_string(),
                "PREFIX-<digits>".to_string(),
            ),
            Some(p) if !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()) => (
                format!("^{}-([0-9]+)$", regex::escape(p)),
                format!("{p}-<digits>"),
            ),
            Some(p) => {
                return Err(ThreatError::config(
                    format!("key prefix '{p}' must be alphabetic"),
                    None,
                ))
            }
        };

        let regex = Regex::new(&source)
            .map_err(|e| ThreatError::config(format!("invalid key pattern: {e}"), None))?;
        Ok(Self { regex, expected })
    }

    /// Extract the numeric suffix of `key`.
    pub fn key_of(&self, key: &str) -> Result<u64> {
        self.regex
            .captures(key)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse::<u64>().ok())
            .ok_or_else(|| ThreatError::malformed_key(key, self.expected.as_str()))
    }
}

/// Extract the numeric suffix of a `PREFIX-<digits>` key.
///
/// Compiles the pattern on every call; build a [`KeyPattern`] once when
/// keying many records.
pub fn key_of(key: &str) -> Result<u64> {
    KeyPattern::new(None)?.key_of(key)
}

/// Pair every record with its key number and sort ascending by that number.
///
/// The sort is stable: records sharing a number keep the order in which
/// they were supplied.
pub fn order_records<'a, I>(pattern: &KeyPattern, records: I) -> Result<Vec<KeyedRecord<'a>>>
where
    I: IntoIterator<Item = (&'a String, &'a ThreatRecord)>,
{
    let mut keyed = records
        .into_iter()
        .map(|(key, record)| {
            pattern.key_of(key).map(|number| KeyedRecord {
                key: key.as_str(),
                number,
                record,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by_key(|k| k.number);

    for pair in keyed.windows(2) {
        if pair[0].number == pair[1].number {
            warn!(
                "Keys {} and {} share number {}; keeping input order",
                pair[0].key, pair[1].key, pair[0].number
            );
        }
    }

    Ok(keyed)
}
