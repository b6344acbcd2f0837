//! Core configuration loading.
//!
//! # Responsibility
//! - Define the configuration surface of the core (logging, database
//!   path, scan period).
//! - Load it from a JSON file, falling back to defaults field by field.
//!
//! # Invariants
//! - A missing config file yields the full default configuration.
//! - A malformed config file is an error, never silently defaulted.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "taskloop.db";
const DEFAULT_SCAN_PERIOD_SECS: u64 = 60;

/// Configuration consumed by core bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<String>,
    pub db_path: String,
    pub scan_period_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: DEFAULT_DB_PATH.to_string(),
            scan_period_secs: DEFAULT_SCAN_PERIOD_SECS,
        }
    }
}

impl CoreConfig {
    /// Scan period as a duration for the scheduler.
    pub fn scan_period(&self) -> Duration {
        Duration::from_secs(self.scan_period_secs)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config file: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

/// Loads configuration from `path`, defaulting when the file is absent.
pub fn load_config(path: impl AsRef<Path>) -> Result<CoreConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(CoreConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    serde_json::from_str(&contents).map_err(ConfigError::Parse)
}
