//! # Gemini Gateway
//!
//! An OpenAI-compatible HTTP gateway backed by the Google Gemini API.
//!
//! Clients speak the OpenAI dialect (`/v1/models`, `/v1/chat/completions`,
//! `/v1/completions`, `/v1/embeddings`); every request is translated into a
//! Gemini `generateContent`, `embedContent` or `batchEmbedContents` call and
//! the answer is reshaped into the OpenAI response format.
//!
//! ## Features
//!
//! - **OpenAI Compatible**: request and response shapes, error envelopes
//! - **Pseudo-streaming**: `stream: true` replays the finished answer as SSE
//! - **Sanitized output**: characters that break JSON clients never leave the gateway
//! - **Usage estimates**: token counts approximated from text length
//!
//! ## Running the gateway
//!
//! ```rust,no_run
//! use gemini_gateway::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/gateway.yaml").await?;
//!     server::serve(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Library use
//!
//! ```rust,no_run
//! use gemini_gateway::core::models::openai::{ChatCompletionRequest, ChatMessage};
//! use gemini_gateway::core::providers::gemini::{GeminiConfig, GeminiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::new(GeminiConfig::from_env())?;
//!     let request = ChatCompletionRequest::new(
//!         "gemini-pro",
//!         vec![ChatMessage::user("What is the capital of France?")],
//!     );
//!     let response = provider.chat_completion(&request).await?;
//!     println!("{}", response.first_text());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use auth::{ApiKey, ApiKeyRegistry};
pub use config::Config;
pub use core::models::openai::*;
pub use core::providers::gemini::{GeminiClient, GeminiConfig, GeminiError, GeminiProvider};
pub use utils::error::{ErrorKind, ErrorResponse, GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
