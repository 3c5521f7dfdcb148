//! Export from an external issue tracker.
//!
//! Issues matching a search query are fetched page by page, restored to
//! creation order and mapped onto [`ThreatRecord`](crate::core::ThreatRecord)s.

pub mod client;
pub mod credentials;
pub mod mapping;
pub mod paging;

pub use client::{IssueSource, JiraClient, RemoteIssue, SearchPage};
pub use credentials::{credentials_for, default_netrc_path, Credentials};
pub use mapping::{custom_field, to_entries, to_threat, CustomField, FieldMap};
pub use paging::fetch_all;
