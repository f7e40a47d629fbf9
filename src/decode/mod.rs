//! Response decoding module
//!
//! Typed model of the hacktivity search response plus the two operations the
//! fetch loop needs from it:
//!
//! - [`PageResponse::nodes`] validates the `data.search.nodes` path in one
//!   place and reports which level is missing as a [`ShapeError`]
//! - [`extract_urls`] pulls `report.url` out of every node that has one

mod types;

pub use types::{GraphQlError, PageResponse, Report, ResultNode, Search, SearchData, ShapeError};

/// Collect the report URLs of a page, in node order.
///
/// Nodes without a `report` or without `report.url` contribute nothing. A
/// response without a node list yields an empty vector.
pub fn extract_urls(response: &PageResponse) -> Vec<String> {
    response
        .nodes()
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(ResultNode::report_url)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
