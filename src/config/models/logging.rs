//! Logging configuration

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json_format: bool,
    /// Directory for rotated log files; `None` logs to the console only
    #[serde(default = "default_log_dir")]
    pub log_dir: Option<String>,
    /// Prefix of the daily error log (warnings and errors)
    #[serde(default = "default_error_file")]
    pub error_file: String,
    /// Prefix of the daily combined log
    #[serde(default = "default_combined_file")]
    pub combined_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_format: false,
            log_dir: default_log_dir(),
            error_file: default_error_file(),
            combined_file: default_combined_file(),
        }
    }
}

impl LoggingConfig {
    /// Merge logging configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.level != default_level() {
            self.level = other.level;
        }
        if other.json_format {
            self.json_format = true;
        }
        if other.log_dir != default_log_dir() {
            self.log_dir = other.log_dir;
        }
        if other.error_file != default_error_file() {
            self.error_file = other.error_file;
        }
        if other.combined_file != default_combined_file() {
            self.combined_file = other.combined_file;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        if self.log_dir.is_some() && (self.error_file.is_empty() || self.combined_file.is_empty()) {
            return Err("Log file prefixes cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> Option<String> {
    Some("logs".to_string())
}

fn default_error_file() -> String {
    "error.log".to_string()
}

fn default_combined_file() -> String {
    "combined.log".to_string()
}
