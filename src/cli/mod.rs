//! CLI module
//!
//! Command-line interface for the fetcher.
//!
//! # Commands
//!
//! - `fetch` - Harvest report URLs into the output file (default)
//! - `show-request` - Print the request body for one offset without sending it

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchArgs};
pub use runner::{Runner, EXIT_INTERRUPTED};
