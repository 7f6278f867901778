//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nextdate/config.toml` by default. Every field is optional:
//!
//! ```toml
//! debug = false
//!
//! [logging]
//! format = "compact"       # or "json"
//! filter = "nextdate=info" # optional, overrides RUST_LOG
//!
//! [output]
//! json = false
//!
//! [upcoming]
//! count = 5
//!
//! [tasks]
//! search_limit = 50
//! ```

use std::path::{Path, PathBuf};

use nextdate_core::{DEFAULT_SEARCH_LIMIT, TracingConfig, TracingOutputFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Largest accepted `upcoming.count`.
pub const MAX_UPCOMING_COUNT: usize = 100;

/// Configuration for the nextdate CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Debug mode.
    pub debug: bool,

    /// Log output settings.
    pub logging: LoggingSettings,

    /// Output settings.
    pub output: OutputSettings,

    /// Settings for the `upcoming` command.
    pub upcoming: UpcomingSettings,

    /// Settings for task commands.
    pub tasks: TaskSettings,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log line format on stderr.
    pub format: TracingOutputFormat,

    /// Filter directive, e.g. `nextdate=trace`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Print JSON instead of plain text.
    pub json: bool,
}

/// Settings for the `upcoming` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpcomingSettings {
    /// Number of occurrences listed when `--count` is not given.
    pub count: usize,
}

impl Default for UpcomingSettings {
    fn default() -> Self {
        Self { count: 5 }
    }
}

/// Settings for task commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSettings {
    /// Maximum number of search results when `--limit` is not given.
    pub search_limit: usize,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::config(format!("failed to parse config: {}", e)))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> CliResult<()> {
        if !(1..=MAX_UPCOMING_COUNT).contains(&self.upcoming.count) {
            return Err(CliError::config(format!(
                "upcoming.count must be between 1 and {}, got {}",
                MAX_UPCOMING_COUNT, self.upcoming.count
            )));
        }
        if self.tasks.search_limit == 0 {
            return Err(CliError::config("tasks.search_limit must be at least 1"));
        }
        Ok(())
    }

    /// Builds the logging setup; `debug` comes from the command line.
    pub fn tracing_config(&self, debug: bool) -> TracingConfig {
        let config = TracingConfig::cli(debug || self.debug).with_format(self.logging.format);
        match &self.logging.filter {
            Some(filter) => config.with_env_filter(filter.clone()),
            None => config,
        }
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nextdate")
    }
}
