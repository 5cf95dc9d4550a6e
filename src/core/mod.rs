//! Core functionality for the Gateway
//!
//! OpenAI-compatible models, the Gemini provider, and the helpers the
//! translation relies on (sanitizing, token estimates, pseudo-streaming).

pub mod models;
pub mod providers;
pub mod sanitize;
pub mod streaming;
pub mod usage;
