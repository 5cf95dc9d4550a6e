//! Embeddings endpoint

use crate::core::models::openai::EmbeddingRequest;
use crate::server::routes::parse_json_body;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Embeddings endpoint
///
/// A single string goes to `embedContent`, an array to
/// `batchEmbedContents`; results keep the input order.
pub async fn embeddings(state: web::Data<AppState>, body: web::Bytes) -> ActixResult<HttpResponse> {
    let request: EmbeddingRequest = parse_json_body(&body)?;
    info!(model = %request.model, "Embedding request");

    let response = state.provider.embedding(request).await?;
    Ok(HttpResponse::Ok().json(response))
}
