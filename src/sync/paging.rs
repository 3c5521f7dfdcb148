//! Accumulating paged search results.

use super::client::{IssueSource, RemoteIssue};
use crate::errors::Result;
use tracing::{debug, warn};

/// Fetch every issue matching `query`, one page of `page_size` at a time.
///
/// Requests are issued serially until the reported total has been
/// collected. The tracker returns newest issues first, so the result is
/// reversed to put the oldest issue first.
pub fn fetch_all<S>(source: &S, query: &str, page_size: usize) -> Result<Vec<RemoteIssue>>
where
    S: IssueSource + ?Sized,
{
    let mut issues: Vec<RemoteIssue> = Vec::new();

    loop {
        let page = source.search(query, issues.len(), page_size)?;
        let received = page.issues.len();
        issues.extend(page.issues);
        debug!("Fetched {} of {} issues", issues.len(), page.total);

        if issues.len() >= page.total {
            break;
        }
        if received == 0 {
            warn!(
                "Tracker returned an empty page at offset {} before reaching total {}",
                issues.len(),
                page.total
            );
            break;
        }
    }

    issues.reverse();
    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ThreatError};
    use crate::sync::client::SearchPage;
    use serde_json::Map;
    use std::cell::RefCell;

    /// Newest-first in-memory tracker holding issues `TM-1..=TM-total`.
    struct FakeTracker {
        total: usize,
        requests: RefCell<Vec<usize>>,
        fail_at: Option<usize>,
    }

    impl FakeTracker {
        fn new(total: usize) -> Self {
            Self {
                total,
                requests: RefCell::new(Vec::new()),
                fail_at: None,
            }
        }
    }

    impl IssueSource for FakeTracker {
        fn search(&self, _query: &str, start_at: usize, max_results: usize) -> crate::errors::Result<SearchPage> {
            self.requests.borrow_mut().push(start_at);
            if self.fail_at == Some(start_at) {
                return Err(ThreatError::remote("503 Service Unavailable"));
            }
            let end = (start_at + max_results).min(self.total);
            let issues = (start_at..end)
                .map(|i| RemoteIssue {
                    key: format!("TM-{}", self.total - i),
                    fields: Map::new(),
                })
                .collect();
            Ok(SearchPage {
                start_at,
                max_results,
                total: self.total,
                issues,
            })
        }
    }

    #[test]
    fn test_pages_until_total_then_reverses() {
        let tracker = FakeTracker::new(120);

        let issues = fetch_all(&tracker, "project = TM", 50).unwrap();

        assert_eq!(*tracker.requests.borrow(), vec![0, 50, 100]);
        assert_eq!(issues.len(), 120);
        assert_eq!(issues[0].key, "TM-1");
        assert_eq!(issues[119].key, "TM-120");
    }

    #[test]
    fn test_empty_result_issues_single_request() {
        let tracker = FakeTracker::new(0);
        let issues = fetch_all(&tracker, "q", 50).unwrap();
        assert!(issues.is_empty());
        assert_eq!(*tracker.requests.borrow(), vec![0]);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let tracker = FakeTracker::new(100);
        fetch_all(&tracker, "q", 50).unwrap();
        assert_eq!(*tracker.requests.borrow(), vec![0, 50]);
    }

    #[test]
    fn test_error_aborts_paging() {
        let tracker = FakeTracker {
            fail_at: Some(50),
            ..FakeTracker::new(120)
        };

        let err = fetch_all(&tracker, "q", 50).unwrap_err();
        assert_eq!(err.code(), ErrorCode::REMOTE);
        assert_eq!(*tracker.requests.borrow(), vec![0, 50]);
    }

    /// Reports a total it never delivers.
    struct ShortTracker;

    impl IssueSource for ShortTracker {
        fn search(&self, _query: &str, start_at: usize, _max_results: usize) -> crate::errors::Result<SearchPage> {
            let issues = if start_at == 0 {
                vec![RemoteIssue { key: "TM-1".into(), fields: Map::new() }]
            } else {
                Vec::new()
            };
            Ok(SearchPage { start_at, max_results: 50, total: 10, issues })
        }
    }

    #[test]
    fn test_short_page_stops_instead_of_looping() {
        let issues = fetch_all(&ShortTracker, "q", 50).unwrap();
        assert_eq!(issues.len(), 1);
    }
}
