//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod gateway;
pub mod logging;
pub mod server;

// Re-export all configuration types
pub use gateway::*;
pub use logging::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3003
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    50 * 1024 * 1024 // 50MB
}

pub fn default_true() -> bool {
    true
}
