//! Configuration schema definitions

use crate::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Accepted sort mode names.
pub const SORT_MODES: &[&str] = &["distance", "price", "date"];

/// Accepted missing-coordinate policies.
pub const COORDINATE_POLICIES: &[&str] = &["origin", "last"];

/// Accepted log levels.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub telemetry: LoggingConfig,
}

impl ConfigSchema {
    /// Check values that serde cannot constrain on its own.
    pub fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new()
            .one_of("search.default_sort", &self.search.default_sort, SORT_MODES)
            .one_of(
                "search.missing_coordinates",
                &self.search.missing_coordinates,
                COORDINATE_POLICIES,
            )
            .range("pool.fetch_timeout_ms", self.pool.fetch_timeout_ms, 1, 600_000)
            .one_of("telemetry.log_level", &self.telemetry.log_level, LOG_LEVELS);

        if let Some(max_results) = self.search.max_results {
            validator = validator.range("search.max_results", max_results, 1, 10_000);
        }

        validator.validate()
    }
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Sort mode when the caller has no preference
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Ranking of offers without pickup coordinates under distance sort
    #[serde(default = "default_missing_coordinates")]
    pub missing_coordinates: String,

    /// Truncate printed results to this many offers
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            missing_coordinates: default_missing_coordinates(),
            max_results: None,
        }
    }
}

fn default_sort() -> String {
    "distance".to_string()
}

fn default_missing_coordinates() -> String {
    "origin".to_string()
}

/// Ride pool snapshot source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Default snapshot path, `~` is expanded
    #[serde(default)]
    pub path: Option<String>,

    /// Upper bound on loading the snapshot
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl PoolConfig {
    /// Snapshot path with `~` and environment variables expanded.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(expand_path)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            path: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

/// Expand `~` and `$VAR` in a user-supplied path, leaving it untouched when
/// a variable is undefined.
pub fn expand_path(path: &str) -> PathBuf {
    shellexpand::full(path)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .unwrap_or_else(|_| PathBuf::from(shellexpand::tilde(path).as_ref()))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
