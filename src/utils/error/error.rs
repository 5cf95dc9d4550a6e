//! Error handling for the Gateway
//!
//! This module defines all error types used throughout the gateway and the
//! OpenAI-compatible envelope they are rendered into.

#![allow(missing_docs)]

use crate::core::providers::gemini::error::{GeminiError, GeminiErrorMapper};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client supplied a request the gateway refuses to forward
    #[error("{0}")]
    InvalidRequest(String),

    /// Registry lookups that found nothing
    #[error("{0}")]
    NotFound(String),

    /// Raw upstream failure that has not been through the error mapper yet
    #[error("Gemini API error: {}", GeminiErrorMapper::compose_message(.0))]
    Provider(#[from] GeminiError),

    /// Upstream failure after classification
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server startup errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("{0}")]
    Internal(String),
}

/// Taxonomy tag carried in the `type` field of the error envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    NotFound,
    Upstream,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid_request_error",
            ErrorKind::NotFound => "not_found_error",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl GatewayError {
    /// Which envelope `type` this error is reported as
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::Provider(_) | GatewayError::Upstream { .. } => ErrorKind::Upstream,
            _ => ErrorKind::Internal,
        }
    }

    /// Numeric HTTP status mirrored into the envelope `code`
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::InvalidRequest(_) => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::Provider(failure) => failure.status().unwrap_or(500),
            GatewayError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Build the `{"error": {...}}` body for this error
    pub fn envelope(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                message: self.to_string(),
                error_type: self.kind().as_str().to_string(),
                code: self.status(),
            },
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}

/// Standard error response format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: u16,
}

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }
}
