//! OpenAI-compatible API models
//!
//! This module defines the data structures the gateway accepts and returns.
//!
//! - `messages` - Message types, roles, and content
//! - `requests` - Request structures for the public endpoints
//! - `responses` - Response structures including the streaming chunk

pub mod messages;
pub mod requests;
pub mod responses;

pub use messages::{
    ChatMessage, ContentPart, EMPTY_MESSAGE_PLACEHOLDER, MessageContent, MessageRole,
};
pub use requests::{
    ChatCompletionRequest, CompletionRequest, DEFAULT_CHAT_MODEL, EmbeddingInput,
    EmbeddingRequest, StreamOptions,
};
pub use responses::{
    ChatChoice, ChatChoiceDelta, ChatCompletionChunk, ChatCompletionResponse, ChatMessageDelta,
    CompletionChoice, CompletionResponse, EmbeddingObject, EmbeddingResponse, EmbeddingUsage,
    FINISH_REASON_STOP, Model, ModelListResponse, Usage,
};
