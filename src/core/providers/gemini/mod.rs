//! Google Gemini Provider
//!
//! Translates OpenAI-compatible chat, completion and embedding requests into
//! Gemini `generateContent` / `embedContent` calls and back.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod transform;

// Re-export main types
pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use error::{GeminiError, GeminiErrorMapper};
pub use models::{EMBEDDING_MODEL, SUPPORTED_MODELS};
pub use provider::GeminiProvider;
