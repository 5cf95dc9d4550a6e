//! Server builder and the `serve` entry point
//!
//! This module provides the ServerBuilder for easier server configuration
//! and `serve`, which the binary uses to run the gateway.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Default location of the YAML configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

/// Serve with an already loaded configuration until shutdown
pub async fn serve(config: Config) -> Result<()> {
    info!("Starting {} v{}", crate::NAME, crate::VERSION);
    info!("Server starting at: http://{}", config.server().address());
    info!("API Endpoints:");
    info!("   GET   /health - Health check");
    info!("   GET   /v1/models - Model list");
    info!("   POST  /v1/chat/completions - Chat completions");
    info!("   POST  /v1/completions - Text completions");
    info!("   POST  /v1/embeddings - Text embeddings");
    info!("   GET   /api-key - API key registry");

    ServerBuilder::new().with_config(config).build()?.start().await
}
