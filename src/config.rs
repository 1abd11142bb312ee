//! Scan settings.
//!
//! Defaults reproduce the stock behavior (5 workers, 2 s per-query delay,
//! 50 results per query, 10 s timeout). An optional TOML file can override
//! any field, and CLI flags override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dorkscan.toml";

/// Search endpoint used unless overridden.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Errors loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Tunables for a scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    /// Concurrent search tasks.
    pub workers: usize,
    /// Sleep after each query, per task.
    pub delay_ms: u64,
    /// Links kept per query.
    pub max_results: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Result-count hint sent to the engine (`num=`).
    pub results_per_page: u32,
    /// Search results endpoint.
    pub search_url: String,
    /// None for the fixed browser UA, "impersonate" for a random one, or a custom string.
    pub user_agent: Option<String>,
    /// Extra attempts after a failed request. 0 disables retry.
    pub retries: u32,
    /// Backoff unit between attempts, multiplied by the attempt number.
    pub retry_backoff_ms: u64,
    /// Minimum spacing between request starts across all workers. 0 disables.
    pub min_interval_ms: u64,
    /// Directory reports are written to.
    pub output_dir: PathBuf,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            workers: 5,
            delay_ms: 2000,
            max_results: 50,
            timeout_secs: 10,
            results_per_page: 100,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: None,
            retries: 0,
            retry_backoff_ms: 1000,
            min_interval_ms: 0,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ScanSettings {
    /// Load settings from `path`, or from `dorkscan.toml` in the working
    /// directory if it exists, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    debug!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from TOML text. Missing fields keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject values the scanner cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be at least 1".into(),
            ));
        }
        if !(1..=100).contains(&self.results_per_page) {
            return Err(ConfigError::Invalid(
                "results_per_page must be between 1 and 100".into(),
            ));
        }
        if url::Url::parse(&self.search_url).is_err() {
            return Err(ConfigError::Invalid(format!(
                "search_url is not a valid URL: {}",
                self.search_url
            )));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}
