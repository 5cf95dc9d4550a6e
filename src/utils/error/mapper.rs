//! Failure classification
//!
//! Every operation of the gateway funnels its failures through [`classify`]
//! before they reach the HTTP layer, so clients always see one of the
//! documented envelope types.

use super::error::GatewayError;
use crate::core::providers::gemini::error::GeminiErrorMapper;
use std::error::Error as StdError;
use tracing::{error, warn};

/// Map any failure raised while serving `operation` into its final form.
///
/// Upstream failures are enriched and logged by [`GeminiErrorMapper`].
/// Validation and registry errors pass through untouched. Everything else is
/// a local failure and collapses into an `internal_error`.
pub fn classify(err: GatewayError, operation: &str) -> GatewayError {
    match err {
        GatewayError::Provider(failure) => GeminiErrorMapper::classify(&failure),
        GatewayError::InvalidRequest(message) => {
            warn!(operation, message = %message, "Rejected invalid request");
            GatewayError::InvalidRequest(message)
        }
        err @ (GatewayError::NotFound(_) | GatewayError::Upstream { .. }) => err,
        other => {
            let message = other.to_string();
            error!(
                operation,
                message = %message,
                chain = %source_chain(&other),
                "Unexpected error"
            );
            GatewayError::Internal(message)
        }
    }
}

/// Render the `source()` chain of an error, innermost last
pub fn source_chain(err: &dyn StdError) -> String {
    let mut parts = vec![format!("{:?}", err)];
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(" <- ")
}
