//! API key management endpoints
//!
//! Thin HTTP surface over the in-memory [`ApiKeyRegistry`](crate::auth::ApiKeyRegistry).

use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

/// Configure API key routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api-key")
            .route("", web::get().to(list_keys))
            .route("/generate", web::post().to(generate_key))
            .route("/{key}/block", web::patch().to(block_key))
            .route("/{key}/unblock", web::patch().to(unblock_key))
            .route("/{key}/expiration", web::patch().to(update_expiration)),
    );
}

/// Body of `PATCH /api-key/{key}/expiration`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpirationRequest {
    pub expires_at: String,
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` meaning midnight UTC
pub fn parse_expiration(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
        .ok_or_else(|| GatewayError::invalid_request(format!("Invalid expiration date: {}", value)))
}

/// List all keys in creation order
pub async fn list_keys(state: web::Data<AppState>) -> HttpResponse {
    debug!("Listing API keys");
    HttpResponse::Ok().json(state.api_keys.list())
}

/// Generate a new key
pub async fn generate_key(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.api_keys.create())
}

pub async fn block_key(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.api_keys.block(&key)?))
}

pub async fn unblock_key(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.api_keys.unblock(&key)?))
}

/// Replace a key's expiration date
pub async fn update_expiration(
    state: web::Data<AppState>,
    key: web::Path<String>,
    body: web::Json<UpdateExpirationRequest>,
) -> ActixResult<HttpResponse> {
    let expires_at = parse_expiration(&body.expires_at)?;
    Ok(HttpResponse::Ok().json(state.api_keys.update_expiration(&key, expires_at)?))
}
