//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod ai;
pub mod api_keys;
pub mod health;

use crate::core::sanitize::strip_lone_surrogate_escapes;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::de::DeserializeOwned;
use tracing::warn;

/// JSON extractor settings shared by every route
///
/// Body parse failures are reported as `invalid_request_error` envelopes
/// instead of actix's plain-text default.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, req| {
            warn!(path = %req.path(), error = %err, "Rejected request body");
            GatewayError::invalid_request(err.to_string()).into()
        })
}

/// Raw body settings for the endpoints that parse their own JSON
pub fn payload_config(limit: usize) -> web::PayloadConfig {
    web::PayloadConfig::new(limit)
}

/// Deserialize a request body, dropping unpaired UTF-16 surrogate escapes first
///
/// A string cut in the middle of a surrogate pair is accepted with the
/// dangling half removed.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    let text = std::str::from_utf8(body).map_err(|e| {
        GatewayError::invalid_request(format!("Request body is not valid UTF-8: {}", e))
    })?;
    serde_json::from_str(&strip_lone_surrogate_escapes(text)).map_err(|e| {
        warn!(error = %e, "Rejected request body");
        GatewayError::invalid_request(format!("Json deserialize error: {}", e))
    })
}

/// Fallback for unmatched routes
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, GatewayError> {
    Err(GatewayError::not_found(format!(
        "Cannot {} {}",
        req.method(),
        req.path()
    )))
}
