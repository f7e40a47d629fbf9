// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # hacktivity-fetch
//!
//! Harvests the URLs of publicly disclosed HackerOne reports from the
//! hacktivity GraphQL search and appends them to a text file.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hacktivity_fetch::{FetchConfig, Fetcher, UrlWriter, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = FetchConfig::default();
//!     let fetcher = Fetcher::new(&config)?;
//!     let mut sink = UrlWriter::open_append(&config.output)?;
//!
//!     let summary = fetcher.run(&mut sink).await?;
//!     println!("{} URLs written ({})", summary.stats.urls_written, summary.stop);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! offset ─► query ─► http POST ─► decode ─► extract ─► output ─► pace ─┐
//!   ▲                                                                  │
//!   └────────────────────────── pagination ◄───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Run configuration
pub mod config;

/// GraphQL query template and page requests
pub mod query;

/// HTTP client
pub mod http;

/// Response model, shape validation and URL extraction
pub mod decode;

/// Offset pagination
pub mod pagination;

/// Append-only URL output
pub mod output;

/// Main fetch loop
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FetchConfig;
pub use engine::{Fetcher, RunSummary, StopReason};
pub use error::{Error, Result};
pub use output::UrlWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
