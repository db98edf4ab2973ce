//! HTTP adapter for the chatbot webhook.
//!
//! - `POST /chatbot/webhook/` - inbound gateway deliveries
//! - `GET /health` - liveness probe

pub mod dto;
mod handlers;
mod routes;

pub use dto::{WebhookPayload, WebhookRequest, WebhookResponse};
pub use handlers::{WebhookApiError, WebhookAppState};
pub use routes::webhook_router;
