//! Gemini Provider
//!
//! Serves the OpenAI-compatible operations from Gemini. Every public method
//! reports failures through [`classify`], so callers only ever see the
//! documented error envelope types.

use chrono::Utc;
use tracing::info;

use super::client::GeminiClient;
use super::config::GeminiConfig;
use super::models::{EMBEDDING_MODEL, list_models, validate_embedding_model, validate_model};
use super::normalize::{extract_embeddings, extract_text};
use super::transform::GenerateContentRequest;
use crate::core::models::openai::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
    EmbeddingRequest, EmbeddingResponse, ModelListResponse,
};
use crate::core::sanitize::sanitize_response;
use crate::core::usage::{estimate_chat_usage, estimate_completion_usage, estimate_embedding_usage};
use crate::utils::error::{GatewayError, Result, classify};

/// OpenAI-compatible facade over the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    /// The fixed model catalogue; never calls upstream
    pub fn list_models(&self) -> ModelListResponse {
        list_models(Utc::now().timestamp_millis())
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.chat_completion_inner(request)
            .await
            .map_err(|e| classify(e, "create_chat_completion"))
    }

    pub async fn completion(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        self.completion_inner(request)
            .await
            .map_err(|e| classify(e, "create_completion"))
    }

    pub async fn embedding(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        self.embedding_inner(request)
            .await
            .map_err(|e| classify(e, "create_embedding"))
    }

    async fn chat_completion_inner(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        info!("Starting chat completion request");

        let model = validate_model(request.model_or_default())?;
        if request.messages.is_empty() {
            return Err(GatewayError::invalid_request(
                "messages must contain at least one message",
            ));
        }

        let body = GenerateContentRequest::from_messages(
            &request.messages,
            request.temperature,
            request.max_tokens,
        );
        let response = sanitize_response(self.client.send_generate(model, &body).await?);
        let text = extract_text(&response);

        let usage = request
            .include_usage()
            .then(|| estimate_chat_usage(&request.messages, &text));

        info!(model, chars = text.len(), "Chat completion finished");
        Ok(ChatCompletionResponse::from_text(
            model,
            text,
            usage,
            Utc::now().timestamp_millis(),
        ))
    }

    async fn completion_inner(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        info!("Starting completion request");

        let model = validate_model(&request.model)?;
        if request.prompt.is_empty() {
            return Err(GatewayError::invalid_request("prompt should not be empty"));
        }

        let body = GenerateContentRequest::from_prompt(
            &request.prompt,
            request.temperature,
            request.max_tokens,
        );
        let response = sanitize_response(self.client.send_generate(model, &body).await?);
        let text = extract_text(&response);
        let usage = estimate_completion_usage(&request.prompt, &text);

        info!(model, chars = text.len(), "Completion finished");
        Ok(CompletionResponse::from_text(
            model,
            text,
            usage,
            Utc::now().timestamp_millis(),
        ))
    }

    async fn embedding_inner(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        info!("Starting embedding request");

        validate_embedding_model(&request.model)?;
        if request.input.is_empty() {
            return Err(GatewayError::invalid_request("input should not be empty"));
        }

        let inputs = request.input.into_inputs();
        let response = sanitize_response(self.client.send_embed(&inputs).await?);
        let vectors = extract_embeddings(&response, inputs.len())?;

        info!(count = vectors.len(), "Embedding finished");
        Ok(EmbeddingResponse::from_vectors(
            EMBEDDING_MODEL,
            vectors,
            estimate_embedding_usage(&inputs),
        ))
    }
}
