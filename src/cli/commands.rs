//! CLI commands and argument parsing

use crate::config::FetchConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Harvest publicly disclosed HackerOne report URLs
#[derive(Parser, Debug)]
#[command(name = "hacktivity-fetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch report URLs and append them to the output file
    Fetch(FetchArgs),

    /// Print the JSON body that would be sent for a page
    ShowRequest {
        /// Offset of the page
        #[arg(long, default_value = "0")]
        offset: u64,

        #[command(flatten)]
        args: FetchArgs,
    },
}

/// Overrides for the run configuration
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// GraphQL endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// File to append report URLs to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of reports to request
    #[arg(long)]
    pub max_reports: Option<u32>,

    /// Reports per request
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Pause after each page, in seconds
    #[arg(long)]
    pub delay_seconds: Option<f64>,

    /// Transport timeout per request, in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Search expression
    #[arg(long)]
    pub query_string: Option<String>,
}

impl FetchArgs {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, mut config: FetchConfig) -> FetchConfig {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(max_reports) = self.max_reports {
            config.max_reports = max_reports;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(delay) = self.delay_seconds {
            config.delay_seconds = delay;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(query) = &self.query_string {
            config.query_string.clone_from(query);
        }
        config
    }
}
