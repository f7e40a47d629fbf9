//! Output module
//!
//! Append-only, newline-delimited sink for report URLs.
//!
//! # Overview
//!
//! The sink is opened once per run in append mode, so repeated runs
//! accumulate lines and never truncate what earlier runs wrote. Nothing is
//! deduplicated.

mod writer;

pub use writer::UrlWriter;
