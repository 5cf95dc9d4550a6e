//! Response normalization
//!
//! Gemini has returned generated text in a few different places over time.
//! Extraction tries each known location in order.

use serde_json::Value;
use tracing::warn;

use crate::utils::error::{GatewayError, Result};

/// Returned when no extractor finds any text
pub const NO_RESPONSE_TEXT: &str = "No response generated";

type TextExtractor = fn(&Value) -> Option<&str>;

fn first_part_text(candidate: &Value) -> Option<&str> {
    candidate.pointer("/content/parts/0/text")?.as_str()
}

fn candidate_text(candidate: &Value) -> Option<&str> {
    candidate.get("text")?.as_str()
}

fn content_text(candidate: &Value) -> Option<&str> {
    candidate.pointer("/content/text")?.as_str()
}

/// Tried in order against `candidates[0]`
const TEXT_EXTRACTORS: [TextExtractor; 3] = [first_part_text, candidate_text, content_text];

/// Generated text of the first candidate, or [`NO_RESPONSE_TEXT`]
pub fn extract_text(response: &Value) -> String {
    let found = response.pointer("/candidates/0").and_then(|candidate| {
        TEXT_EXTRACTORS
            .iter()
            .find_map(|extract| extract(candidate).filter(|text| !text.is_empty()))
    });

    match found {
        Some(text) => text.to_string(),
        None => {
            warn!(response = %response, "Unexpected response structure, no text generated");
            NO_RESPONSE_TEXT.to_string()
        }
    }
}

/// Embedding vectors in input order.
///
/// A batch response carries `embeddings[i].values`; a single response carries
/// `embedding.values`.
pub fn extract_embeddings(response: &Value, input_count: usize) -> Result<Vec<Vec<f64>>> {
    let raw: Vec<&Value> = if input_count > 1 {
        response
            .get("embeddings")
            .and_then(Value::as_array)
            .ok_or_else(|| unexpected_embedding_response(response))?
            .iter()
            .collect()
    } else {
        vec![response.get("embedding").ok_or_else(|| unexpected_embedding_response(response))?]
    };

    if raw.len() != input_count {
        warn!(
            expected = input_count,
            received = raw.len(),
            "Gemini returned a different number of embeddings than inputs"
        );
    }

    raw.into_iter()
        .map(|embedding| -> Result<Vec<f64>> {
            embedding
                .get("values")
                .and_then(Value::as_array)
                .ok_or_else(|| unexpected_embedding_response(response))?
                .iter()
                .map(|v| v.as_f64().ok_or_else(|| unexpected_embedding_response(response)))
                .collect()
        })
        .collect()
}

fn unexpected_embedding_response(response: &Value) -> GatewayError {
    GatewayError::internal(format!(
        "Unexpected embedding response from Gemini: {}",
        response
    ))
}
