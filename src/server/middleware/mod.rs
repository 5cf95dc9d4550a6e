//! HTTP middleware implementations
//!
//! - Request ID tagging and request/response logging

mod helpers;
mod request_logging;

pub use helpers::{body_excerpt, client_ip, is_event_stream, user_agent};
pub use request_logging::{REQUEST_ID_HEADER, RequestLogging, RequestLoggingService};
