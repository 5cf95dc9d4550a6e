//! Response types for OpenAI-compatible API
//!
//! This module defines response structures for chat completions, text
//! completions, embeddings and model listings, including the streaming chunk.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::messages::{ChatMessage, MessageRole};

pub const FINISH_REASON_STOP: &str = "stop";

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp (unix millis)
    pub created: i64,
    /// Model used
    pub model: String,
    /// System fingerprint
    pub system_fingerprint: String,
    /// Choices
    pub choices: Vec<ChatChoice>,
    /// Usage statistics, present only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Single-choice response carrying `text` as the assistant message
    pub fn from_text(model: &str, text: String, usage: Option<Usage>, created: i64) -> Self {
        Self {
            id: format!("chatcmpl-{}", created),
            object: "chat.completion".to_string(),
            created,
            model: model.to_string(),
            system_fingerprint: format!("fp_{}", created),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(text),
                finish_reason: FINISH_REASON_STOP.to_string(),
            }],
            usage,
        }
    }

    /// Text of the first choice
    pub fn first_text(&self) -> String {
        self.choices
            .first()
            .map(|c| c.message.content.flatten())
            .unwrap_or_default()
    }
}

/// Chat choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Choice index
    pub index: u32,
    /// Message
    pub message: ChatMessage,
    /// Finish reason
    pub finish_reason: String,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Chat completion chunk (for streaming)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    /// Response ID
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: i64,
    /// Model used
    pub model: String,
    /// Choices
    pub choices: Vec<ChatChoiceDelta>,
}

impl ChatCompletionChunk {
    fn from_response(response: &ChatCompletionResponse, choice: ChatChoiceDelta) -> Self {
        Self {
            id: response.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: response.created,
            model: response.model.clone(),
            choices: vec![choice],
        }
    }

    /// Chunk carrying the whole assistant message
    pub fn content(response: &ChatCompletionResponse) -> Self {
        Self::from_response(
            response,
            ChatChoiceDelta {
                index: 0,
                delta: ChatMessageDelta {
                    role: Some(MessageRole::Assistant),
                    content: Some(response.first_text()),
                },
                finish_reason: None,
            },
        )
    }

    /// Terminal chunk with an empty delta
    pub fn finish(response: &ChatCompletionResponse) -> Self {
        Self::from_response(
            response,
            ChatChoiceDelta {
                index: 0,
                delta: ChatMessageDelta::default(),
                finish_reason: Some(FINISH_REASON_STOP.to_string()),
            },
        )
    }
}

/// Chat choice delta (for streaming)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoiceDelta {
    /// Choice index
    pub index: u32,
    /// Delta message
    pub delta: ChatMessageDelta,
    /// Finish reason, `null` until the last chunk
    pub finish_reason: Option<String>,
}

/// Chat message delta (for streaming)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessageDelta {
    /// Message role (only in first chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,
    /// Content delta
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Text completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Response ID
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: i64,
    /// Model used
    pub model: String,
    /// Completion choices
    pub choices: Vec<CompletionChoice>,
    /// Usage statistics
    pub usage: Usage,
}

impl CompletionResponse {
    pub fn from_text(model: &str, text: String, usage: Usage, created: i64) -> Self {
        Self {
            id: format!("cmpl-{}", created),
            object: "text_completion".to_string(),
            created,
            model: model.to_string(),
            choices: vec![CompletionChoice {
                text,
                index: 0,
                logprobs: None,
                finish_reason: FINISH_REASON_STOP.to_string(),
            }],
            usage,
        }
    }
}

/// Completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChoice {
    /// Generated text
    pub text: String,
    /// Choice index
    pub index: u32,
    /// Log probabilities, always `null`
    pub logprobs: Option<Value>,
    /// Finish reason
    pub finish_reason: String,
}

/// Embedding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Object type
    pub object: String,
    /// Embedding data
    pub data: Vec<EmbeddingObject>,
    /// Model used
    pub model: String,
    /// Usage statistics
    pub usage: EmbeddingUsage,
}

impl EmbeddingResponse {
    /// Wrap vectors in input order
    pub fn from_vectors(model: &str, vectors: Vec<Vec<f64>>, usage: EmbeddingUsage) -> Self {
        Self {
            object: "list".to_string(),
            data: vectors
                .into_iter()
                .enumerate()
                .map(|(index, embedding)| EmbeddingObject {
                    object: "embedding".to_string(),
                    embedding,
                    index: index as u32,
                })
                .collect(),
            model: model.to_string(),
            usage,
        }
    }
}

/// Embedding object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingObject {
    /// Object type
    pub object: String,
    /// Embedding vector
    pub embedding: Vec<f64>,
    /// Index
    pub index: u32,
}

/// Embedding usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Model information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Model ID
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: i64,
    /// Owner
    pub owned_by: String,
}

/// Model list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    /// Object type
    pub object: String,
    /// List of models
    pub data: Vec<Model>,
}
