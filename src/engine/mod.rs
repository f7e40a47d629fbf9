//! Execution engine module
//!
//! The fetch loop: build a page request, send it, validate the response,
//! append the report URLs, advance the offset, pause, repeat.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Fetcher` - Runs the paginated fetch against one endpoint
//! - `Pacer` - The wait between pages (`TokioPacer` in production)
//! - `StopReason`, `FetchStats`, `RunSummary` - What a run reports back
//!
//! A run stops at the first of: request budget spent, an empty page, a
//! response without `data.search.nodes`, or a transport failure. Nothing is
//! retried and nothing is skipped.

mod pacer;
mod types;

pub use pacer::{Pacer, TokioPacer};
pub use types::{FetchStats, RunSummary, StopReason};

use crate::config::FetchConfig;
use crate::decode::{extract_urls, PageResponse};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::UrlWriter;
use crate::pagination::PageCursor;
use crate::query::{PageRequest, QueryTemplate};
use chrono::Utc;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Paginated fetcher for the hacktivity search
pub struct Fetcher<P: Pacer = TokioPacer> {
    /// HTTP client
    client: HttpClient,
    /// GraphQL endpoint
    endpoint: String,
    /// Query shared by every page
    template: QueryTemplate,
    /// Request budget
    max_requests: u32,
    /// Pause after each processed page
    delay: Duration,
    /// Waits between pages
    pacer: P,
}

impl Fetcher<TokioPacer> {
    /// Create a fetcher for a validated run config
    pub fn new(config: &FetchConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(HttpClientConfig::from_fetch_config(config))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            template: QueryTemplate::from_config(config),
            max_requests: config.max_requests(),
            delay: config.delay(),
            pacer: TokioPacer,
        })
    }
}

impl<P: Pacer> Fetcher<P> {
    /// Replace the pacer
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> Fetcher<Q> {
        Fetcher {
            client: self.client,
            endpoint: self.endpoint,
            template: self.template,
            max_requests: self.max_requests,
            delay: self.delay,
            pacer,
        }
    }

    /// The query template
    pub fn template(&self) -> &QueryTemplate {
        &self.template
    }

    /// The pacer
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Send one page request and decode the reply
    pub async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<PageResponse> {
        self.client.post_for_json(&self.endpoint, request).await
    }

    /// Run the fetch loop, appending every report URL to `sink`.
    ///
    /// Endpoint failures end the run and are reported through
    /// [`RunSummary::stop`]. Only sink write failures are returned as `Err`.
    pub async fn run<W: Write>(&self, sink: &mut UrlWriter<W>) -> Result<RunSummary> {
        let start = Instant::now();
        let started_at = Utc::now();
        let mut cursor = PageCursor::new(self.template.page_size(), self.max_requests);
        let mut stats = FetchStats::new();

        info!(
            "Fetching up to {} pages of {} reports from {}",
            self.max_requests,
            self.template.page_size(),
            self.endpoint
        );

        let stop = loop {
            let Some(offset) = cursor.start_request() else {
                info!("Reached the request budget of {}", self.max_requests);
                break StopReason::BudgetExhausted;
            };

            let request = self.template.build_request(offset);
            stats.add_request();
            debug!("Requesting reports from offset {offset}");

            let response = match self.fetch_page(&request).await {
                Ok(response) => response,
                Err(e) => {
                    error!("Request at offset {offset} failed: {e}");
                    break StopReason::transport(&e);
                }
            };

            if let Some(total) = response.total_count() {
                debug!("Endpoint reports {total} results");
                stats.total_count = Some(total);
            }

            let nodes = match response.nodes() {
                Ok(nodes) => nodes,
                Err(shape) => {
                    for message in response.error_messages() {
                        warn!("GraphQL error: {message}");
                    }
                    warn!("No valid data found in the response: {shape}");
                    break StopReason::InvalidShape(shape);
                }
            };

            if nodes.is_empty() {
                info!("No reports found in this batch");
                break StopReason::EmptyBatch;
            }

            let urls = extract_urls(&response);
            for url in &urls {
                info!("Found report URL: {url}");
            }
            if urls.len() < nodes.len() {
                debug!(
                    "Skipped {} nodes without a report URL",
                    nodes.len() - urls.len()
                );
            }

            let written = sink.append_urls(&urls)?;
            stats.add_page(nodes.len(), written);

            cursor.advance();
            self.pacer.pause(self.delay).await;
        };

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Stopped after {} requests ({stop}): {} URLs written",
            stats.requests_sent, stats.urls_written
        );

        Ok(RunSummary {
            stop,
            stats,
            started_at,
        })
    }
}

impl<P: Pacer> std::fmt::Debug for Fetcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("endpoint", &self.endpoint)
            .field("max_requests", &self.max_requests)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
