//! Pagination state

use crate::config::FetchConfig;

/// Offset cursor bounded by a request budget.
///
/// The offset of the `i`-th request is always `i * page_size`: the cursor
/// only moves forward by whole pages and is never reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    offset: u64,
    page_size: u32,
    requests_started: u32,
    max_requests: u32,
}

impl PageCursor {
    /// Create a cursor at offset zero
    pub fn new(page_size: u32, max_requests: u32) -> Self {
        Self {
            offset: 0,
            page_size,
            requests_started: 0,
            max_requests,
        }
    }

    /// Cursor for a run config
    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.page_size, config.max_requests())
    }

    /// Offset of the next page
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reports per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Requests started so far
    pub fn requests_started(&self) -> u32 {
        self.requests_started
    }

    /// Request budget for the run
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Whether another request may be issued
    pub fn has_budget(&self) -> bool {
        self.requests_started < self.max_requests
    }

    /// Claim the next request slot, returning its offset.
    ///
    /// Returns `None` once the budget is spent.
    pub fn start_request(&mut self) -> Option<u64> {
        if !self.has_budget() {
            return None;
        }
        self.requests_started += 1;
        Some(self.offset)
    }

    /// Move past the page that was just processed
    pub fn advance(&mut self) {
        self.offset += u64::from(self.page_size);
    }
}
