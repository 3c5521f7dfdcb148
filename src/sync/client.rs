//! Issue tracker search client.
//!
//! [`IssueSource`] is the seam between the paging loop and the network: the
//! blocking [`JiraClient`] talks to a Jira-compatible REST search endpoint,
//! tests substitute an in-memory source.

use super::credentials::Credentials;
use crate::errors::{Result, ThreatError};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("threatutil/", env!("CARGO_PKG_VERSION"));

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub max_results: usize,
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<RemoteIssue>,
}

/// An issue as returned by the tracker; fields are kept untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

pub trait IssueSource {
    /// Fetch up to `max_results` issues matching `query`, starting at
    /// offset `start_at`.
    fn search(&self, query: &str, start_at: usize, max_results: usize) -> Result<SearchPage>;
}

pub struct JiraClient {
    base_url: String,
    credentials: Credentials,
    fields: Vec<String>,
    http: reqwest::blocking::Client,
}

impl JiraClient {
    /// Client for `https://<host>` authenticating with basic auth.
    pub fn new(host: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            base_url: format!("https://{host}"),
            credentials,
            fields: Vec::new(),
            http,
        })
    }

    /// Restrict the returned issue fields to `fields`.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/rest/api/2/search", self.base_url)
    }
}

impl IssueSource for JiraClient {
    fn search(&self, query: &str, start_at: usize, max_results: usize) -> Result<SearchPage> {
        let url = self.search_url();
        let mut params = vec![
            ("jql", query.to_string()),
            ("startAt", start_at.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }

        debug!("GET {} startAt={} maxResults={}", url, start_at, max_results);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.login, Some(&self.credentials.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ThreatError::remote(format!("{url} returned {status}")));
        }

        Ok(response.json::<SearchPage>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_deserializes_tracker_response() {
        let body = r#"{
            "expand": "schema,names",
            "startAt": 50,
            "maxResults": 50,
            "total": 51,
            "issues": [
                {"id": "10001", "key": "TM-1", "fields": {"summary": "s", "customfield_1": null}}
            ]
        }"#;

        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.start_at, 50);
        assert_eq!(page.total, 51);
        assert_eq!(page.issues.len(), 1);
        assert_eq!(page.issues[0].key, "TM-1");
        assert!(page.issues[0].fields["customfield_1"].is_null());
    }

    #[test]
    fn test_client_targets_https_search_endpoint() {
        let creds = Credentials {
            login: "u".into(),
            password: "p".into(),
        };
        let client = JiraClient::new("jira.example.org", creds, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.search_url(),
            "https://jira.example.org/rest/api/2/search"
        );
    }
}
