//! Gemini Error Handling
//!
//! Upstream failures and their translation into gateway errors.

use crate::utils::error::GatewayError;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// Snapshot of the outbound call that failed, kept for logging
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: &'static str,
    pub url: String,
    pub payload: Value,
}

impl OutboundRequest {
    pub fn post(url: impl Into<String>, payload: Value) -> Self {
        Self {
            method: "POST",
            url: url.into(),
            payload,
        }
    }
}

/// Failure talking to the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Upstream answered with a non-success status
    #[error("Request failed with status code {status}")]
    Api {
        status: u16,
        body: Value,
        request: OutboundRequest,
    },

    /// No response was received (connect failure, timeout, broken body)
    #[error("{message}")]
    Transport {
        message: String,
        request: OutboundRequest,
    },
}

impl GeminiError {
    /// HTTP status reported by the upstream, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            GeminiError::Transport { .. } => None,
        }
    }

    pub fn request(&self) -> &OutboundRequest {
        match self {
            GeminiError::Api { request, .. } | GeminiError::Transport { request, .. } => request,
        }
    }

    /// Whether the upstream rejected the payload itself
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    fn body(&self) -> Option<&Value> {
        match self {
            GeminiError::Api { body, .. } => Some(body),
            GeminiError::Transport { .. } => None,
        }
    }
}

/// Translates [`GeminiError`] into the gateway's upstream error
pub struct GeminiErrorMapper;

impl GeminiErrorMapper {
    /// Human readable description of the failure, without the provider prefix
    pub fn compose_message(failure: &GeminiError) -> String {
        let body_error = failure.body().and_then(|body| body.get("error"));

        let mut message = body_error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| failure.to_string());
        if message.is_empty() {
            message = "Unknown error occurred".to_string();
        }

        let first_detail = body_error
            .and_then(|e| e.get("details"))
            .and_then(Value::as_array)
            .and_then(|details| details.first());

        if let Some(detail) = first_detail {
            let summary = ["description", "reason"]
                .iter()
                .filter_map(|field| detail.get(*field).and_then(Value::as_str))
                .find(|s| !s.is_empty());
            if let Some(summary) = summary {
                message.push_str("\nDetails: ");
                message.push_str(summary);
            }

            let violations: Vec<String> = detail
                .get("fieldViolations")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .map(|v| {
                            format!(
                                "{}: {}",
                                v.get("field").and_then(Value::as_str).unwrap_or_default(),
                                v.get("description").and_then(Value::as_str).unwrap_or_default()
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();
            if !violations.is_empty() {
                message.push_str("\nField violations:\n");
                message.push_str(&violations.join("\n"));
            }
        }

        message
    }

    /// Log the failure with its full context and produce the client-facing error
    pub fn classify(failure: &GeminiError) -> GatewayError {
        let status = failure.status().unwrap_or(500);
        let mut message = Self::compose_message(failure);
        let request = failure.request();

        error!(
            status,
            response = %failure.body().map(|b| b.to_string()).unwrap_or_default(),
            method = request.method,
            url = %request.url,
            payload = %request.payload,
            "Gemini API error: {}",
            message
        );

        if status == 400 {
            let pretty = serde_json::to_string_pretty(&request.payload)
                .unwrap_or_else(|_| request.payload.to_string());
            message.push_str("\nRequest payload: ");
            message.push_str(&pretty);
        }

        GatewayError::Upstream {
            status,
            message: format!("Gemini API error: {}", message),
        }
    }
}
