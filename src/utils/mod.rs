//! Utility modules for the gateway
//!
//! - **error**: Error type, envelope rendering and failure classification
//! - **logging**: Tracing subscriber setup with rotated log files

pub mod error; // Error handling
pub mod logging; // Logging & monitoring

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate string to at most `max_chars` characters with ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
