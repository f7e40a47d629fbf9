//! Run configuration
//!
//! Every tunable of a fetch run lives in [`FetchConfig`]. Values come from
//! built-in defaults, optionally overridden by a YAML file and then by CLI
//! flags.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// HackerOne GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://hackerone.com/graphql";

/// Default sink file
pub const DEFAULT_OUTPUT: &str = "h1reports.txt";

/// Reports requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Upper bound on reports fetched in one run
pub const DEFAULT_MAX_REPORTS: u32 = 5000;

/// Search expression matching every disclosed report
pub const DEFAULT_QUERY_STRING: &str = "*:*";

// ============================================================================
// FetchConfig
// ============================================================================

/// Configuration for a single fetch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// File report URLs are appended to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Number of reports per request
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum number of reports to request over the run
    #[serde(default = "default_max_reports")]
    pub max_reports: u32,

    /// Pause after each successful page, in seconds
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Transport timeout per request, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Search expression sent as `queryString`
    #[serde(default = "default_query_string")]
    pub query_string: String,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_reports() -> u32 {
    DEFAULT_MAX_REPORTS
}

fn default_delay_seconds() -> f64 {
    1.0
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_query_string() -> String {
    DEFAULT_QUERY_STRING.to_string()
}

fn default_user_agent() -> String {
    format!("hacktivity-fetch/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            output: default_output(),
            page_size: default_page_size(),
            max_reports: default_max_reports(),
            delay_seconds: default_delay_seconds(),
            timeout_seconds: default_timeout_seconds(),
            query_string: default_query_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a YAML string. Missing keys fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the output file
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the report budget
    #[must_use]
    pub fn with_max_reports(mut self, max_reports: u32) -> Self {
        self.max_reports = max_reports;
        self
    }

    /// Set the pacing delay in seconds
    #[must_use]
    pub fn with_delay_seconds(mut self, seconds: f64) -> Self {
        self.delay_seconds = seconds;
        self
    }

    /// Set the transport timeout in seconds
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the search expression
    #[must_use]
    pub fn with_query_string(mut self, query: impl Into<String>) -> Self {
        self.query_string = query.into();
        self
    }

    /// Number of requests the report budget allows.
    ///
    /// Integer division: a budget smaller than one page issues no requests.
    pub fn max_requests(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.max_reports / self.page_size
    }

    /// Pacing delay as a `Duration`.
    ///
    /// Values `validate` rejects map to zero.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_seconds).unwrap_or(Duration::ZERO)
    }

    /// Transport timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parse the endpoint as a URL
    pub fn endpoint_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.endpoint)?)
    }

    /// Check the config for values a run cannot work with
    pub fn validate(&self) -> Result<()> {
        let url = self.endpoint_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be greater than zero",
            ));
        }

        if Duration::try_from_secs_f64(self.delay_seconds).is_err() {
            return Err(Error::invalid_value(
                "delay_seconds",
                "must be a non-negative number of seconds that fits a duration",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "timeout_seconds",
                "must be greater than zero",
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(Error::invalid_value("output", "must not be empty"));
        }

        Ok(())
    }
}
