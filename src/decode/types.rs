//! Hacktivity search response types
//!
//! Every level is optional: the endpoint may omit `data`, `search` or
//! `nodes`, and nodes routinely lack fields. Unused upstream fields are kept
//! as raw JSON so an unexpected type never fails the whole page.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Which part of the `data.search.nodes` path was absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("response has no 'data' object")]
    MissingData,
    #[error("response has no 'data.search' object")]
    MissingSearch,
    #[error("response has no 'data.search.nodes' list")]
    MissingNodes,
}

/// Decoded body of one search request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResponse {
    /// GraphQL `data` object
    pub data: Option<SearchData>,
    /// GraphQL `errors` array
    pub errors: Option<Vec<GraphQlError>>,
}

impl PageResponse {
    /// The result nodes, or the first missing level of the path.
    ///
    /// An explicit `"nodes": null` is an empty page, not a missing one.
    pub fn nodes(&self) -> Result<&[ResultNode], ShapeError> {
        let data = self.data.as_ref().ok_or(ShapeError::MissingData)?;
        let search = data.search.as_ref().ok_or(ShapeError::MissingSearch)?;
        match &search.nodes {
            Some(nodes) => Ok(nodes.as_deref().unwrap_or_default()),
            None => Err(ShapeError::MissingNodes),
        }
    }

    /// Total result count the endpoint claims to have
    pub fn total_count(&self) -> Option<u64> {
        self.data
            .as_ref()
            .and_then(|d| d.search.as_ref())
            .and_then(|s| s.total_count.as_ref())
            .and_then(Value::as_u64)
    }

    /// Messages of any GraphQL errors in the response
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .flatten()
            .filter_map(|e| e.message.as_deref())
            .collect()
    }
}

/// GraphQL `data` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchData {
    /// Search results
    pub search: Option<Search>,
}

/// The `search` field of the query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Search {
    /// Number of results matching the query, as sent
    #[serde(default)]
    pub total_count: Option<Value>,
    /// Results of this page. `None` when the key is absent, `Some(None)`
    /// when it is `null`.
    #[serde(default, deserialize_with = "present")]
    pub nodes: Option<Option<Vec<ResultNode>>>,
}

/// Marks a key as present even when its value is `null`
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// One hacktivity entry.
///
/// Only `report.url` is typed; everything else stays raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultNode {
    pub report: Option<Report>,
    /// Every other field of the node
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultNode {
    /// URL of the disclosed report, if present
    pub fn report_url(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.url.as_deref())
    }
}

/// Report details nested in a node
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the GraphQL `errors` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlError {
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
