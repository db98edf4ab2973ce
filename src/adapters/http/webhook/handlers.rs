//! HTTP handlers for the chatbot webhook.
//!
//! These handlers connect Axum routes to the inbound webhook command handler.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    CustomerFlowError, CustomerMessageHandler, InboundWebhookHandler, ResponseFlowDispatcher,
    SupportCommandHandler, WebhookOutcome, DEFAULT_FLOW_TIMEOUT,
};
use crate::domain::foundation::SupportAllowlist;
use crate::domain::tags::TagRules;
use crate::ports::{ConversationResponder, MessagingGateway};

use super::dto::{HealthResponse, WebhookRequest, WebhookResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook routes.
///
/// Built once at startup; cloned per request.
#[derive(Clone)]
pub struct WebhookAppState {
    pub gateway: Arc<dyn MessagingGateway>,
    pub responder: Arc<dyn ConversationResponder>,
    pub allowlist: Arc<SupportAllowlist>,
    pub dispatcher: Arc<ResponseFlowDispatcher>,
    /// Messages requested from the gateway per customer message.
    pub history_limit: u32,
    /// Deadline for answering one customer message.
    pub flow_timeout: Duration,
}

impl WebhookAppState {
    /// Alerts go to `<primary allowlist entry>@<alert_suffix>`.
    pub fn new(
        gateway: Arc<dyn MessagingGateway>,
        responder: Arc<dyn ConversationResponder>,
        allowlist: SupportAllowlist,
        rules: TagRules,
        alert_suffix: &str,
        history_limit: u32,
    ) -> Self {
        let dispatcher = Arc::new(ResponseFlowDispatcher::new(
            gateway.clone(),
            rules,
            allowlist.alert_chat_id(alert_suffix),
        ));
        Self {
            gateway,
            responder,
            allowlist: Arc::new(allowlist),
            dispatcher,
            history_limit,
            flow_timeout: DEFAULT_FLOW_TIMEOUT,
        }
    }

    pub fn with_flow_timeout(mut self, timeout: Duration) -> Self {
        self.flow_timeout = timeout;
        self
    }

    /// Create the inbound handler from the shared state.
    pub fn inbound_handler(&self) -> InboundWebhookHandler {
        InboundWebhookHandler::new(
            self.allowlist.clone(),
            SupportCommandHandler::new(self.gateway.clone()),
            CustomerMessageHandler::new(
                self.gateway.clone(),
                self.responder.clone(),
                self.dispatcher.clone(),
                self.history_limit,
            )
            .with_timeout(self.flow_timeout),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chatbot/webhook/ - Handle one gateway delivery
pub async fn handle_webhook(
    State(state): State<WebhookAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let request: WebhookRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected malformed webhook body");
        WebhookApiError::MalformedBody(e.to_string())
    })?;

    let outcome = state.inbound_handler().handle(request.payload.into()).await?;

    let response = match outcome {
        WebhookOutcome::Ignored(_) => WebhookResponse::ignored(),
        WebhookOutcome::SupportOk(_) => WebhookResponse::support_ok(),
        WebhookOutcome::SupportFailed(_) => WebhookResponse::support_command_failed(),
        WebhookOutcome::CustomerOk(_) => WebhookResponse::ok(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook failures to HTTP responses.
///
/// The body never carries detail; it is logged instead.
#[derive(Debug, thiserror::Error)]
pub enum WebhookApiError {
    #[error("malformed webhook body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    CustomerFlow(#[from] CustomerFlowError),
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            WebhookApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            WebhookApiError::CustomerFlow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(WebhookResponse::error())).into_response()
    }
}
