//! Comply Gateway - LLM-backed compliance checks for social media drafts
//!
//! This service forwards a draft together with the compliance policy to a
//! chat-completion API and returns a compliant / non-compliant verdict.

use std::sync::Arc;

use tokio::net::TcpListener;

mod api;
mod config;
mod domain;
mod engine;
mod error;
mod logging;

use crate::api::build_router;
use crate::config::{Config, API_KEY_ENV};
use crate::domain::PolicyContext;
use crate::engine::{CheckSettings, ComplianceChecker, GroqClient, GroqConfig};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The compliance checker; `None` when no completion client is available.
    pub checker: Option<Arc<ComplianceChecker>>,
    /// Policy text loaded at startup.
    pub policy: Arc<PolicyContext>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Load configuration
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    // Initialize logging
    logging::init(config.logging.format);

    tracing::info!("Starting Comply Gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.llm.model,
        timeout_secs = config.llm.timeout_secs,
        policy_path = %config.policy.path,
        "Configuration loaded"
    );

    // Load policy document
    let policy = PolicyContext::load(&config.policy.path, config.policy.strict).map_err(|e| {
        anyhow::anyhow!("Policy error: failed to read {}: {}", config.policy.path, e)
    })?;
    tracing::info!(
        source = %policy.source(),
        chars = policy.text().chars().count(),
        max_prompt_chars = config.policy.max_chars,
        "Policy context ready"
    );
    let policy = Arc::new(policy);

    // Build the compliance checker if a credential is available
    let checker = build_checker(&config, policy.clone());

    let state = AppState { checker, policy };

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Create the checker, or `None` (health-only mode) when the completion
/// client cannot be set up.
fn build_checker(config: &Config, policy: Arc<PolicyContext>) -> Option<Arc<ComplianceChecker>> {
    let Some(groq_config) = GroqConfig::from_llm_config(&config.llm) else {
        tracing::error!(
            env = API_KEY_ENV,
            "API key not found, compliance checks are disabled"
        );
        return None;
    };

    match GroqClient::new(groq_config) {
        Ok(client) => {
            tracing::info!(base_url = %config.llm.base_url, "Groq client initialized");
            Some(Arc::new(ComplianceChecker::new(
                Arc::new(client),
                policy,
                CheckSettings::from_config(&config.llm, &config.policy),
            )))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Groq client");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
