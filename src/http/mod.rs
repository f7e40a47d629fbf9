//! HTTP client module
//!
//! Provides the JSON-over-POST client used to talk to the GraphQL endpoint.
//!
//! # Features
//!
//! - **Strict success**: only HTTP 200 counts as a page; every other status
//!   is surfaced as [`Error::HttpStatus`](crate::Error::HttpStatus)
//! - **Timeouts**: a per-client transport timeout, reported as
//!   [`Error::Timeout`](crate::Error::Timeout)
//! - **No retries**: each call sends exactly one request

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
