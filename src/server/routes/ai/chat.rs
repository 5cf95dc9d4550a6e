//! Chat completions endpoint

use crate::core::models::openai::ChatCompletionRequest;
use crate::core::streaming::PseudoStream;
use crate::server::routes::parse_json_body;
use crate::server::state::AppState;
use actix_web::http::header::{CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Chat completions endpoint
///
/// OpenAI-compatible chat completions API. Gemini is always called once and
/// to completion; when `stream` is set the finished answer is replayed as
/// Server-Sent Events. Upstream failures are returned as a JSON error before
/// any stream is opened.
pub async fn chat_completions(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let request: ChatCompletionRequest = parse_json_body(&body)?;
    info!(
        model = request.model_or_default(),
        messages = request.messages.len(),
        stream = request.is_stream(),
        "Chat completion request"
    );

    let response = state.provider.chat_completion(&request).await?;

    if request.is_stream() {
        Ok(HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/event-stream"))
            .insert_header((CACHE_CONTROL, "no-cache"))
            .insert_header((CONNECTION, "keep-alive"))
            .streaming(futures::stream::iter(PseudoStream::new(response))))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}
