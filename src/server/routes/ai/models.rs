//! Model listing and retrieval endpoints

use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// List available models
///
/// Returns the fixed Gemini catalogue; no upstream call is made.
pub async fn list_models(state: web::Data<AppState>) -> HttpResponse {
    debug!("Listing available models");
    HttpResponse::Ok().json(state.provider.list_models())
}

/// Get specific model information
pub async fn get_model(
    state: web::Data<AppState>,
    model_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    debug!("Getting model info for: {}", model_id);

    let model = state
        .provider
        .list_models()
        .data
        .into_iter()
        .find(|m| m.id == *model_id)
        .ok_or_else(|| GatewayError::not_found(format!("Model {} not found", model_id)))?;
    Ok(HttpResponse::Ok().json(model))
}
