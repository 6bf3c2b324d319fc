//! Error types for Comply Gateway.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::engine::CompletionError;

/// Unified error type for gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotInitialized(String),

    #[error("Compliance check failed: {0}")]
    Upstream(String),

    #[error("Compliance check timed out after {0}s")]
    UpstreamTimeout(u64),
}

impl From<CompletionError> for GatewayError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Timeout(secs) => GatewayError::UpstreamTimeout(secs),
            other => GatewayError::Upstream(other.to_string()),
        }
    }
}

/// Error response body for API clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl GatewayError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            GatewayError::NotInitialized(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CLIENT_NOT_INITIALIZED")
            }
            GatewayError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            GatewayError::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
