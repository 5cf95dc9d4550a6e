//! Request/response logging middleware
//!
//! Tags every request with an `x-request-id`, buffers the request body so it
//! can be logged next to the outcome, and buffers the response body of
//! everything except event streams.

use actix_web::HttpMessage;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::{Bytes, BytesMut};
use futures::StreamExt;
use futures::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, error, info};

use super::helpers::{
    CHAT_COMPLETIONS_PATH, body_excerpt, client_ip, is_event_stream, user_agent,
};
use crate::utils::error::GatewayError;
use crate::utils::generate_request_id;

/// Header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware for Actix-web
#[derive(Debug, Clone)]
pub struct RequestLogging {
    body_limit: usize,
}

impl RequestLogging {
    /// `body_limit` caps how much of a request body is buffered
    pub fn new(body_limit: usize) -> Self {
        Self { body_limit }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestLoggingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingService {
            service: Rc::new(service),
            body_limit: self.body_limit,
        }))
    }
}

/// Service implementation for request logging middleware
pub struct RequestLoggingService<S> {
    service: Rc<S>,
    body_limit: usize,
}

async fn read_body(req: &mut ServiceRequest, limit: usize) -> Result<Bytes, actix_web::Error> {
    let mut payload = req.take_payload();
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(GatewayError::invalid_request(format!(
                "request body exceeds the {} byte limit",
                limit
            ))
            .into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

impl<S, B> Service<ServiceRequest> for RequestLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let body_limit = self.body_limit;

        Box::pin(async move {
            let started = Instant::now();
            let request_id = generate_request_id();
            let header_value = HeaderValue::from_str(&request_id)
                .unwrap_or_else(|_| HeaderValue::from_static("invalid"));
            req.headers_mut().insert(
                HeaderName::from_static(REQUEST_ID_HEADER),
                header_value.clone(),
            );

            let method = req.method().to_string();
            let url = req.uri().to_string();
            let agent = user_agent(req.headers());
            let ip = client_ip(&req);

            let request_body = read_body(&mut req, body_limit).await?;
            req.set_payload(Payload::from(request_body.clone()));

            if req.path() == CHAT_COMPLETIONS_PATH {
                info!(
                    request_id = %request_id,
                    %method,
                    %url,
                    user_agent = %agent,
                    ip = %ip,
                    body = %body_excerpt(&request_body),
                    "Incoming chat completion request"
                );
            } else {
                debug!(request_id = %request_id, %method, %url, "Incoming request");
            }

            let mut res = service.call(req).await?.map_into_boxed_body();
            res.headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);

            let status = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis() as u64;

            if is_event_stream(res.headers()) {
                info!(
                    request_id = %request_id,
                    %method,
                    %url,
                    status,
                    elapsed_ms,
                    user_agent = %agent,
                    ip = %ip,
                    body = "streaming",
                    "Request completed"
                );
                return Ok(res);
            }

            let (http_req, http_res) = res.into_parts();
            let (http_res, body) = http_res.into_parts();
            let response_body = actix_web::body::to_bytes(body)
                .await
                .map_err(actix_web::error::ErrorInternalServerError)?;

            if status >= 400 {
                error!(
                    request_id = %request_id,
                    %method,
                    %url,
                    status,
                    elapsed_ms,
                    user_agent = %agent,
                    ip = %ip,
                    request_body = %body_excerpt(&request_body),
                    body = %body_excerpt(&response_body),
                    "Request failed"
                );
            } else {
                info!(
                    request_id = %request_id,
                    %method,
                    %url,
                    status,
                    elapsed_ms,
                    user_agent = %agent,
                    ip = %ip,
                    body = %body_excerpt(&response_body),
                    "Request completed"
                );
            }

            let http_res = http_res.set_body(BoxBody::new(response_body));
            Ok(ServiceResponse::new(http_req, http_res))
        })
    }
}
