//! Helper functions for middleware

use actix_web::dev::ServiceRequest;
use actix_web::http::header::{CONTENT_TYPE, HeaderMap, USER_AGENT};

/// Path whose request bodies are always logged
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Longest body excerpt written to the log
pub const MAX_LOGGED_BODY_CHARS: usize = 4096;

/// Whether a response is a Server-Sent Events stream
pub fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/event-stream"))
}

/// User agent header, empty when absent
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Client address, honouring `Forwarded` / `X-Forwarded-For`
pub fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Body as loggable text
pub fn body_excerpt(body: &[u8]) -> String {
    crate::utils::truncate_string(&String::from_utf8_lossy(body), MAX_LOGGED_BODY_CHARS)
}
