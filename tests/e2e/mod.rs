//! End-to-end tests against the real Gemini API
//!
//! Require `GEMINI_API_KEY`; run with `cargo test -- --ignored`.
