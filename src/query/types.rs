//! Query template and request payload types

use super::document::{HACKTIVITY_SEARCH_QUERY, OPERATION_NAME};
use crate::config::{FetchConfig, DEFAULT_PAGE_SIZE, DEFAULT_QUERY_STRING};
use serde::{Deserialize, Serialize};

/// Sort direction for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

/// GraphQL `SortInput`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: "disclosed_at".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// Immutable description of the search every page shares.
///
/// Only the offset changes between requests, so the document and the
/// fixed variables are kept here and borrowed by each [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    operation_name: String,
    document: String,
    query_string: String,
    page_size: u32,
    sort: Sort,
    product_area: String,
    product_feature: String,
}

impl Default for QueryTemplate {
    fn default() -> Self {
        Self {
            operation_name: OPERATION_NAME.to_string(),
            document: HACKTIVITY_SEARCH_QUERY.to_string(),
            query_string: DEFAULT_QUERY_STRING.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
            product_area: "hacktivity".to_string(),
            product_feature: "overview".to_string(),
        }
    }
}

impl QueryTemplate {
    /// Template for the public hacktivity overview search
    pub fn hacktivity() -> Self {
        Self::default()
    }

    /// Template using the page size and search expression of a run config
    pub fn from_config(config: &FetchConfig) -> Self {
        Self::hacktivity()
            .with_page_size(config.page_size)
            .with_query_string(&config.query_string)
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the search expression
    #[must_use]
    pub fn with_query_string(mut self, query: impl Into<String>) -> Self {
        self.query_string = query.into();
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Reports requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// GraphQL operation name
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Build the request for the page starting at `offset`
    pub fn build_request(&self, offset: u64) -> PageRequest<'_> {
        PageRequest {
            operation_name: &self.operation_name,
            variables: SearchVariables {
                query_string: &self.query_string,
                size: self.page_size,
                from: offset,
                sort: &self.sort,
                product_area: &self.product_area,
                product_feature: &self.product_feature,
            },
            query: &self.document,
        }
    }
}

/// Variables of one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchVariables<'a> {
    /// Search expression
    #[serde(rename = "queryString")]
    pub query_string: &'a str,
    /// Page size
    pub size: u32,
    /// Offset of the first result
    pub from: u64,
    /// Sort order
    pub sort: &'a Sort,
    /// Product area tag
    pub product_area: &'a str,
    /// Product feature tag
    pub product_feature: &'a str,
}

/// Body of one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest<'a> {
    /// GraphQL operation name
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    /// Operation variables
    pub variables: SearchVariables<'a>,
    /// GraphQL document
    pub query: &'a str,
}

impl PageRequest<'_> {
    /// Offset this request starts at
    pub fn offset(&self) -> u64 {
        self.variables.from
    }
}
