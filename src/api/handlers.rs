//! HTTP request handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::api::types::*;
use crate::domain::{truncate_chars, ComplianceResult};
use crate::engine::DRAFT_LOG_CHARS;
use crate::error::{GatewayError, GatewayResult};
use crate::AppState;

/// Service banner.
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "running".to_string(),
        message: "Comply AI API is active".to_string(),
        endpoints: vec!["/check-compliance".to_string(), "/health".to_string()],
    })
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        groq_connected: state.checker.is_some(),
        policy_loaded: state.policy.is_loaded(),
    })
}

/// Check a draft against the policy.
///
/// POST /check-compliance
#[utoipa::path(
    post,
    path = "/check-compliance",
    request_body = DraftRequest,
    responses(
        (status = 200, description = "Check complete", body = ComplianceResult),
        (status = 400, description = "Draft text missing or blank", body = crate::error::ErrorResponse),
        (status = 500, description = "Client not initialized or upstream failure", body = crate::error::ErrorResponse),
        (status = 504, description = "Upstream timed out", body = crate::error::ErrorResponse)
    ),
    tag = "compliance"
)]
pub async fn check_compliance(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> GatewayResult<Json<ComplianceResult>> {
    let request = payload.map(|Json(request)| request);
    let draft = match &request {
        Ok(request) => request.text.as_deref().unwrap_or(""),
        Err(_) => "",
    };

    let Some(checker) = state.checker.as_ref() else {
        tracing::error!(
            draft = %truncate_chars(draft, DRAFT_LOG_CHARS),
            "Compliance check rejected: Groq client not initialized"
        );
        return Err(GatewayError::NotInitialized(
            "Groq client not initialized".to_string(),
        ));
    };

    let request = request.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Compliance check rejected: invalid body");
        GatewayError::BadRequest(rejection.body_text())
    })?;

    let draft = request.text.unwrap_or_default();
    if draft.trim().is_empty() {
        tracing::warn!(
            draft = %truncate_chars(&draft, DRAFT_LOG_CHARS),
            "Compliance check rejected: empty draft"
        );
        return Err(GatewayError::BadRequest(
            "Draft text is required".to_string(),
        ));
    }

    let result = checker.check(&draft).await?;

    Ok(Json(result))
}
