//! HTTP routes for intake endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, post_message, post_webhook, IntakeAppState};

/// Creates the intake router with all endpoints.
pub fn intake_routes(state: IntakeAppState) -> Router {
    Router::new()
        .route("/api/messages", post(post_message))
        .route("/webhook", post(post_webhook))
        .route("/health", get(health))
        .with_state(state)
}
