//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ==================== Root ====================

/// Service status banner.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Always "running".
    pub status: String,
    pub message: String,
    /// Available endpoints.
    pub endpoints: Vec<String>,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Whether the completion client was initialized.
    pub groq_connected: bool,
    /// Whether the policy text is non-empty.
    pub policy_loaded: bool,
}

// ==================== Check Compliance ====================

/// Draft submitted for a compliance check.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DraftRequest {
    /// The draft text. Required; blank text is rejected.
    #[serde(default)]
    pub text: Option<String>,
}
