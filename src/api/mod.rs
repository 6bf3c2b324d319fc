//! HTTP API layer for Comply Gateway.
//!
//! Provides the status, health, and compliance-check endpoints.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
