//! Gateway failure taxonomy and its wire envelope.
//!
//! Every failure becomes `{"error": ..., "details"?: ...}`; `details` is only
//! present when the upstream rejected the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure talking to the upstream at the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("credential is not a valid header value")]
    InvalidCredential,
}

/// Terminal failure states of a single gateway invocation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The credential is missing from process configuration.
    #[error("Server Error: {0} is not configured.")]
    MissingCredential(String),

    #[error("Bad Request: No API path provided.")]
    MissingPath,

    /// The fragment falls outside a configured allow-list.
    #[error("Forbidden: API path not allowed.")]
    PathNotAllowed,

    /// The upstream answered with a non-success status.
    #[error("GitHub API Error: {}", .status.as_u16())]
    Upstream { status: StatusCode, details: Value },

    /// Cause is logged, never sent to the caller.
    #[error("Internal Server Error: Failed to fetch data.")]
    Transport(#[from] TransportError),
}

impl GatewayError {
    /// Status code returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::MissingPath => StatusCode::BAD_REQUEST,
            GatewayError::PathNotAllowed => StatusCode::FORBIDDEN,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::MissingCredential(_) => "config_error",
            GatewayError::MissingPath => "bad_request",
            GatewayError::PathNotAllowed => "forbidden",
            GatewayError::Upstream { .. } => "upstream_error",
            GatewayError::Transport(_) => "transport_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let details = match &self {
            GatewayError::Upstream { details, .. } => Some(details),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (self.status(), Json(body)).into_response()
    }
}
