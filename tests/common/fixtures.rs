//! Test fixtures
//!
//! Request bodies in the OpenAI dialect and responses in the Gemini one.

use serde_json::{Value, json};

/// Gemini `generateContent` success body
pub fn generate_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 8,
            "candidatesTokenCount": 4,
            "totalTokenCount": 12
        }
    })
}

/// Gemini `embedContent` success body
pub fn embed_response(values: &[f64]) -> Value {
    json!({ "embedding": { "values": values } })
}

/// Gemini `batchEmbedContents` success body
pub fn batch_embed_response(vectors: &[Vec<f64>]) -> Value {
    let embeddings: Vec<Value> = vectors.iter().map(|v| json!({ "values": v })).collect();
    json!({ "embeddings": embeddings })
}

/// Google API error body
pub fn error_body(code: u16, message: &str, status: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "status": status
        }
    })
}

/// Single user message chat request
pub fn chat_request(model: &str, content: &str) -> Value {
    json!({
        "model": model,
        "messages": [{ "role": "user", "content": content }]
    })
}

/// Chat request asking for an SSE response
pub fn chat_stream_request(model: &str, content: &str, include_usage: bool) -> Value {
    json!({
        "model": model,
        "messages": [{ "role": "user", "content": content }],
        "stream": true,
        "stream_options": { "include_usage": include_usage }
    })
}

pub fn completion_request(model: &str, prompt: &str) -> Value {
    json!({ "model": model, "prompt": prompt })
}

pub fn embedding_request(input: Value) -> Value {
    json!({ "model": "text-embedding-004", "input": input })
}
