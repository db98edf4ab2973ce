//! HTTP DTOs for the chatbot webhook.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::InboundDelivery;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Webhook envelope posted by the gateway.
///
/// Only `payload.from` and `payload.body` are read; everything else the
/// gateway sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// Sender chat id; non-string values count as missing.
    #[serde(default, deserialize_with = "string_or_none")]
    pub from: Option<String>,
    /// Message text; non-string values count as missing.
    #[serde(default, deserialize_with = "string_or_none")]
    pub body: Option<String>,
}

impl From<WebhookPayload> for InboundDelivery {
    fn from(payload: WebhookPayload) -> Self {
        InboundDelivery {
            from: payload.from,
            body: payload.body,
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Acknowledgement body returned for every delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl WebhookResponse {
    fn status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            origin: None,
        }
    }

    pub fn ok() -> Self {
        Self::status("ok")
    }

    pub fn ignored() -> Self {
        Self::status("ignored")
    }

    pub fn support_ok() -> Self {
        Self {
            status: "ok".to_string(),
            origin: Some("support".to_string()),
        }
    }

    pub fn support_command_failed() -> Self {
        Self::status("support_command_failed")
    }

    pub fn error() -> Self {
        Self::status("error")
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
