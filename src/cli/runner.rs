//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FetchArgs};
use crate::config::FetchConfig;
use crate::engine::Fetcher;
use crate::error::Result;
use crate::output::UrlWriter;
use crate::query::QueryTemplate;
use tracing::{info, warn};

/// Exit code used when the run is interrupted with Ctrl-C
pub const EXIT_INTERRUPTED: i32 = 130;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, returning the process exit code
    pub async fn run(&self) -> Result<i32> {
        match &self.cli.command {
            None => self.fetch(&FetchArgs::default()).await,
            Some(Commands::Fetch(args)) => self.fetch(args).await,
            Some(Commands::ShowRequest { offset, args }) => self.show_request(*offset, args),
        }
    }

    /// Defaults, then the config file, then flags
    pub fn resolve_config(&self, args: &FetchArgs) -> Result<FetchConfig> {
        let base = match &self.cli.config {
            Some(path) => FetchConfig::load(path)?,
            None => FetchConfig::default(),
        };
        let config = args.apply(base);
        config.validate()?;
        Ok(config)
    }

    async fn fetch(&self, args: &FetchArgs) -> Result<i32> {
        let config = self.resolve_config(args)?;
        let fetcher = Fetcher::new(&config)?;
        let mut sink = UrlWriter::open_append(&config.output)?;
        info!("Appending report URLs to {}", config.output.display());

        let outcome = tokio::select! {
            summary = fetcher.run(&mut sink) => Some(summary?),
            () = interrupted() => None,
        };

        let Some(summary) = outcome else {
            warn!(
                "Interrupted, {} URLs written to {}",
                sink.lines_written(),
                config.output.display()
            );
            return Ok(EXIT_INTERRUPTED);
        };

        info!(
            "Done: {} pages, {} URLs written, {} nodes skipped in {}ms (started {})",
            summary.stats.pages_processed,
            summary.stats.urls_written,
            summary.stats.nodes_skipped(),
            summary.stats.duration_ms,
            summary.started_at.to_rfc3339()
        );

        Ok(summary.exit_code())
    }

    fn show_request(&self, offset: u64, args: &FetchArgs) -> Result<i32> {
        let config = self.resolve_config(args)?;
        let template = QueryTemplate::from_config(&config);
        println!(
            "{}",
            serde_json::to_string_pretty(&template.build_request(offset))?
        );
        Ok(0)
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
