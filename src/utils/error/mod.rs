//! Error handling utilities
//!
//! This module provides the gateway error type, its OpenAI-compatible
//! envelope, and the classifier every operation reports failures through.

pub mod error;
pub mod mapper;

// Re-export commonly used types and functions
pub use error::*;
pub use mapper::classify;
