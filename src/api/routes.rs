//! Route definitions for the API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::AppState;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health_check,
        handlers::check_compliance,
    ),
    components(schemas(
        crate::api::types::RootResponse,
        crate::api::types::HealthResponse,
        crate::api::types::DraftRequest,
        crate::domain::ComplianceResult,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "compliance", description = "Draft compliance checks"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Comply AI API",
        version = "1.0",
        description = "Checks social media drafts against a compliance policy using an LLM",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router.
///
/// CORS is fully open: the browser extension calls from arbitrary origins.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/check-compliance", post(handlers::check_compliance))
        .with_state(state)
        // OpenAPI docs
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
