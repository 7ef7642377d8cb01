//! Configuration file
//!
//! ```json
//! { "data_dir": "./data", "audit_enabled": true, "log_decisions": true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Append every decision to `<data_dir>/audit/decisions.log` (default true)
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Emit one structured log line per decision (default true)
    #[serde(default = "default_true")]
    pub log_decisions: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Directory holding the record snapshot
    pub fn state_dir(&self) -> PathBuf {
        self.data_path().join("state")
    }

    /// Decision audit log file
    pub fn audit_log_path(&self) -> PathBuf {
        self.data_path().join("audit").join("decisions.log")
    }
}
