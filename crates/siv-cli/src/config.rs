//! Configuration loading for the Sentinel Invest CLI.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use siv_core::{SnapshotFile, Stores, DEFAULT_BUDGET};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where dashboard records come from.
    #[serde(default)]
    pub data: DataConfig,

    /// Behaviour of long-running dashboard operations.
    #[serde(default)]
    pub operations: OperationsConfig,

    /// Budget used for allocation metrics.
    #[serde(default)]
    pub investments: InvestmentsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from a file.
    ///
    /// Returns `Ok(None)` when the file does not exist. Any other read error,
    /// and any file that is not a valid configuration, is an error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))
            }
        };

        let config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Some(config))
    }

    /// Loads the file at `path`, or defaults when it does not exist, and
    /// checks the result.
    pub fn validate_file(path: &Path) -> Result<(Self, Stores)> {
        let config = Self::load(path)?.unwrap_or_default();
        let stores = config.check()?;
        Ok((config, stores))
    }

    /// Checks settings that serde cannot, then loads the configured snapshot.
    pub fn check(&self) -> Result<Stores> {
        if siv_observability::parse_level(&self.logging.level).is_none() {
            bail!("Unrecognized log level: {}", self.logging.level);
        }
        self.load_stores()
    }

    /// Loads the configured snapshot, or the built-in one when none is set.
    pub fn load_stores(&self) -> Result<Stores> {
        let snapshot = match &self.data.snapshot_path {
            Some(path) => SnapshotFile::load(path)
                .with_context(|| format!("Failed to load snapshot: {}", path.display()))?,
            None => SnapshotFile::builtin().context("Failed to load built-in snapshot")?,
        };
        snapshot
            .into_stores()
            .context("Snapshot contains invalid records")
    }
}

/// Data source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Snapshot document (YAML, or JSON by extension). Built-in sample data
    /// is used when unset.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// Operation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsConfig {
    /// Whether operations wait their simulated duration before settling.
    #[serde(default = "default_true")]
    pub simulate_delays: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            simulate_delays: default_true(),
        }
    }
}

/// Investment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentsConfig {
    /// Total budget that recommended spend is measured against.
    #[serde(default = "default_budget")]
    pub budget: u64,
}

fn default_budget() -> u64 {
    DEFAULT_BUDGET
}

impl Default for InvestmentsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to use JSON format.
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Subscriber settings for this configuration. `--verbose` overrides the
    /// configured level; an unrecognized level falls back to `warn`.
    pub fn subscriber_config(&self, verbose: bool) -> siv_observability::LoggingConfig {
        let config = if verbose {
            siv_observability::LoggingConfig::verbose()
        } else {
            let level =
                siv_observability::parse_level(&self.level).unwrap_or(tracing::Level::WARN);
            siv_observability::LoggingConfig::at_level(level)
        };
        config.with_json(self.json_format)
    }
}
