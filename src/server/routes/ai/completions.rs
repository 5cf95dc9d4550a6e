//! Text completions endpoint (legacy)

use crate::core::models::openai::CompletionRequest;
use crate::server::routes::parse_json_body;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Text completions endpoint
pub async fn completions(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let request: CompletionRequest = parse_json_body(&body)?;
    info!(model = %request.model, "Completion request");

    let response = state.provider.completion(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}
