//! Gemini Client
//!
//! Thin HTTP layer over the Gemini REST API. Bodies are decoded leniently:
//! a success response that is not JSON is handed back as a JSON string so
//! the normalizer can decide what to make of it.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::config::GeminiConfig;
use super::error::{GeminiError, OutboundRequest};
use super::models::EMBEDDING_MODEL;
use super::transform::{BatchEmbedContentsRequest, EmbedContentRequest, GenerateContentRequest};
use crate::core::sanitize::strip_lone_surrogate_escapes;
use crate::utils::error::{GatewayError, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    /// Create a client; the API key is not required until the first call
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str> {
        self.config.api_key().ok_or_else(|| {
            error!("Gemini API key not configured");
            GatewayError::internal("Gemini API key not configured")
        })
    }

    /// `generateContent`, replayed once with a degraded payload if the
    /// upstream rejects the original with 400
    pub async fn send_generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value> {
        let api_key = self.api_key()?;
        let url = self.config.endpoint(model, "generateContent");

        info!(model, contents = request.contents.len(), "Sending request to Gemini API");

        match self.post(&url, api_key, request).await {
            Err(failure) if failure.is_bad_request() => {
                warn!(
                    model,
                    "Gemini rejected the request payload, retrying with first parts only"
                );
                Ok(self.post(&url, api_key, &request.degraded()).await?)
            }
            result => Ok(result?),
        }
    }

    /// `embedContent` for one input, `batchEmbedContents` for several
    pub async fn send_embed(&self, inputs: &[String]) -> Result<Value> {
        let api_key = self.api_key()?;

        info!(inputs = inputs.len(), "Sending embedding request to Gemini API");

        let response = match inputs {
            [single] => {
                let url = self.config.endpoint(EMBEDDING_MODEL, "embedContent");
                self.post(&url, api_key, &EmbedContentRequest::single(single)).await?
            }
            _ => {
                let url = self.config.endpoint(EMBEDDING_MODEL, "batchEmbedContents");
                self.post(&url, api_key, &BatchEmbedContentsRequest::new(inputs)).await?
            }
        };
        Ok(response)
    }

    async fn post<T: Serialize>(
        &self,
        url: &str,
        api_key: &str,
        body: &T,
    ) -> std::result::Result<Value, GeminiError> {
        let payload = serde_json::to_value(body).map_err(|e| GeminiError::Transport {
            message: format!("Failed to encode request: {}", e),
            request: OutboundRequest::post(url, Value::Null),
        })?;
        let request = OutboundRequest::post(url, payload);

        debug!(url, payload = %request.payload, "Gemini request");

        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&request.payload)
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                return Err(GeminiError::Transport {
                    message: e.to_string(),
                    request,
                });
            }
        };

        let status = response.status();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                return Err(GeminiError::Transport {
                    message: format!("Failed to read response body: {}", e),
                    request,
                });
            }
        };

        let cleaned = strip_lone_surrogate_escapes(&raw);
        let body = serde_json::from_str::<Value>(&cleaned)
            .unwrap_or_else(|_| Value::String(cleaned.into_owned()));

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
                request,
            });
        }

        debug!(status = status.as_u16(), "Gemini response received");
        Ok(body)
    }
}
