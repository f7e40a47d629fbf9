//! Engine types
//!
//! Stop reasons, statistics and the summary returned by a run.

use crate::decode::ShapeError;
use crate::error::Error;
use chrono::{DateTime, Utc};
use std::fmt;

/// Why a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every request the budget allows was issued
    BudgetExhausted,
    /// A well-formed page came back with no nodes
    EmptyBatch,
    /// A 200 response lacked the `data.search.nodes` path
    InvalidShape(ShapeError),
    /// Non-200 status, network error, timeout or undecodable body
    TransportFailure {
        /// Error description
        message: String,
        /// HTTP status, when one was received
        status: Option<u16>,
    },
}

impl StopReason {
    /// Build a transport failure from the error that caused it
    pub fn transport(error: &Error) -> Self {
        Self::TransportFailure {
            message: error.to_string(),
            status: error.status(),
        }
    }

    /// Whether the run ended because of a failure talking to the endpoint
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::TransportFailure { .. })
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetExhausted => write!(f, "request budget exhausted"),
            Self::EmptyBatch => write!(f, "no more reports"),
            Self::InvalidShape(shape) => write!(f, "invalid response: {shape}"),
            Self::TransportFailure { message, .. } => write!(f, "request failed: {message}"),
        }
    }
}

/// Statistics from a fetch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Requests sent to the endpoint
    pub requests_sent: u32,
    /// Pages whose URLs were written
    pub pages_processed: u32,
    /// Result nodes seen across processed pages
    pub nodes_seen: usize,
    /// URLs appended to the sink
    pub urls_written: usize,
    /// Latest `total_count` reported by the endpoint
    pub total_count: Option<u64>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request
    pub fn add_request(&mut self) {
        self.requests_sent += 1;
    }

    /// Count a processed page
    pub fn add_page(&mut self, nodes: usize, urls: usize) {
        self.pages_processed += 1;
        self.nodes_seen += nodes;
        self.urls_written += urls;
    }

    /// Nodes that carried no report URL
    pub fn nodes_skipped(&self) -> usize {
        self.nodes_seen.saturating_sub(self.urls_written)
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Outcome of [`Fetcher::run`](super::Fetcher::run)
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Why the run ended
    pub stop: StopReason,
    /// Counters collected during the run
    pub stats: FetchStats,
    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl RunSummary {
    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        self.stop.exit_code()
    }
}
