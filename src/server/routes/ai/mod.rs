//! AI API endpoints (OpenAI compatible)
//!
//! This module provides OpenAI-compatible API endpoints served by Gemini.

mod chat;
mod completions;
mod embeddings;
mod models;

pub use chat::chat_completions;
pub use completions::completions;
pub use embeddings::embeddings;
pub use models::{get_model, list_models};

use actix_web::web;

/// Configure AI API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            // Chat completions
            .route("/chat/completions", web::post().to(chat_completions))
            // Text completions (legacy)
            .route("/completions", web::post().to(completions))
            // Embeddings
            .route("/embeddings", web::post().to(embeddings))
            // Models
            .route("/models", web::get().to(list_models))
            .route("/models/{model_id}", web::get().to(get_model)),
    );
}
