//! Axum router configuration for the chatbot webhook.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_webhook, health, WebhookAppState};

/// Create the webhook router.
///
/// # Routes
/// - `POST /chatbot/webhook/` - gateway deliveries (also without trailing slash)
/// - `GET /health` - liveness probe
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .route("/chatbot/webhook/", post(handle_webhook))
        .route("/chatbot/webhook", post(handle_webhook))
        .route("/health", get(health))
}
