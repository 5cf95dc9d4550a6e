//! AI provider implementations
//!
//! Only Google Gemini is served; requests in other dialects are translated
//! before they get here.

pub mod gemini;

pub use gemini::GeminiProvider;
