//! GraphQL query module
//!
//! Holds the fixed `HacktivitySearchQuery` document and builds the page
//! requests sent to the search endpoint.
//!
//! # Overview
//!
//! A [`QueryTemplate`] is built once per run and never mutated. Each page is
//! a [`PageRequest`] produced by [`QueryTemplate::build_request`], which
//! differs from the previous one only in its `from` offset.

mod document;
mod types;

pub use document::{HACKTIVITY_SEARCH_QUERY, OPERATION_NAME};
pub use types::{PageRequest, QueryTemplate, SearchVariables, Sort, SortDirection};
