//! Application state shared across HTTP handlers

use crate::auth::ApiKeyRegistry;
use crate::config::Config;
use crate::core::providers::GeminiProvider;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every actix worker, so all fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Gemini facade serving the `/v1` routes
    pub provider: Arc<GeminiProvider>,
    /// Registry behind the `/api-key` routes
    pub api_keys: Arc<ApiKeyRegistry>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config) -> Result<Self> {
        let provider = GeminiProvider::new(config.gemini().clone())?;
        Ok(Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
            api_keys: Arc::new(ApiKeyRegistry::new()),
        })
    }
}
