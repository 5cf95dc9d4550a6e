//! Gemini model catalogue

use crate::core::models::openai::{Model, ModelListResponse};
use crate::utils::error::{GatewayError, Result};

/// Models accepted for chat and text completions
pub const SUPPORTED_MODELS: [&str; 2] = ["gemini-pro", "gemini-pro-vision"];

/// The only model served on the embeddings endpoint
pub const EMBEDDING_MODEL: &str = "text-embedding-004";

/// Accept `model` only if it is one of [`SUPPORTED_MODELS`]
pub fn validate_model(model: &str) -> Result<&str> {
    if SUPPORTED_MODELS.contains(&model) {
        Ok(model)
    } else {
        Err(GatewayError::invalid_request(format!(
            "Unsupported model: {}. Supported models are: {}",
            model,
            SUPPORTED_MODELS.join(", ")
        )))
    }
}

pub fn validate_embedding_model(model: &str) -> Result<&str> {
    if model == EMBEDDING_MODEL {
        Ok(model)
    } else {
        Err(GatewayError::invalid_request(format!(
            "Invalid model. Only {} is supported for embeddings.",
            EMBEDDING_MODEL
        )))
    }
}

/// Static listing for `GET /v1/models`
pub fn list_models(created: i64) -> ModelListResponse {
    ModelListResponse {
        object: "list".to_string(),
        data: SUPPORTED_MODELS
            .iter()
            .map(|id| Model {
                id: id.to_string(),
                object: "model".to_string(),
                created,
                owned_by: "google".to_string(),
            })
            .collect(),
    }
}
