//! Configuration loading utilities
//!
//! Environment variables layered over whatever the config file provided.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::env;
use tracing::debug;

/// Environment lookup, injectable for tests
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment; empty values count as unset
pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl<F: Fn(&str) -> Option<String>> EnvSource for F {
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: String) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", key, e)))
}

impl GatewayConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env(&process_env)
    }

    /// Overlay recognised environment variables
    pub fn apply_env(mut self, source: &dyn EnvSource) -> Result<Self> {
        debug!("Applying configuration from environment variables");

        // Server configuration
        if let Some(host) = source.get("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = source.get("GATEWAY_PORT").or_else(|| source.get("PORT")) {
            self.server.port = parse("port", port)?;
        }
        if let Some(workers) = source.get("GATEWAY_WORKERS") {
            self.server.workers = Some(parse("workers count", workers)?);
        }
        if let Some(dir) = source.get("GATEWAY_STATIC_DIR") {
            self.server.static_dir = Some(dir);
        }

        // Gemini configuration
        if let Some(api_key) = source.get("GEMINI_API_KEY") {
            self.gemini.api_key = Some(api_key);
        }
        if let Some(base_url) = source.get("GEMINI_BASE_URL") {
            self.gemini.base_url = base_url;
        }
        if let Some(timeout) = source.get("GEMINI_TIMEOUT") {
            self.gemini.request_timeout = parse("Gemini timeout", timeout)?;
        }

        // Logging configuration
        if let Some(dir) = source.get("LOG_DIR") {
            self.logging.log_dir = Some(dir);
        }
        if let Some(format) = source.get("LOG_FORMAT") {
            self.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        Ok(self)
    }
}
