//! Main gateway configuration

use super::*;
use crate::core::providers::gemini::GeminiConfig;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini upstream configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.gemini = self.gemini.merge(other.gemini);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.server.cors.validate()?;
        self.gemini.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
