//! Gemini Configuration Module

use serde::{Deserialize, Serialize};
use std::env;

/// Public Gemini REST endpoint for model operations
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";

/// Configuration for the Gemini upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (Google AI Studio). Checked on first use, not at startup.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL up to and including `/models`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl GeminiConfig {
    /// Configuration pointing at Google AI Studio with the given key
    pub fn new_google_ai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Default configuration with the key taken from `GEMINI_API_KEY`
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }

    /// Point the client at another base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Configured key, if it is non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// `{base}/{model}:{operation}`
    pub fn endpoint(&self, model: &str, operation: &str) -> String {
        format!(
            "{}/{}:{}",
            self.base_url.trim_end_matches('/'),
            model,
            operation
        )
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        if other.api_key().is_some() {
            self.api_key = other.api_key;
        }
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.request_timeout != default_request_timeout() {
            self.request_timeout = other.request_timeout;
        }
        if other.connect_timeout != default_connect_timeout() {
            self.connect_timeout = other.connect_timeout;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Gemini base URL cannot be empty".to_string());
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("Gemini base URL must be http(s): {}", self.base_url));
        }
        if self.request_timeout == 0 {
            return Err("Request timeout cannot be 0".to_string());
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}
