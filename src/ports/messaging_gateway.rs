//! Messaging Gateway Port - Interface for the chat platform HTTP gateway.
//!
//! Covers the only four operations the bot needs: sending text, reading
//! recent history, and toggling the typing indicator.
//!
//! # Failure semantics
//!
//! Every operation returns an explicit `Result`. Adapters log failures
//! themselves; callers treat a failed call as a no-op and never retry it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::ChatId;

/// Port for the messaging platform gateway.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Sends a text message to a chat.
    async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<(), GatewayError>;

    /// Fetches up to `limit` recent messages of a chat, in gateway order.
    async fn get_history_messages(
        &self,
        chat_id: &ChatId,
        limit: u32,
    ) -> Result<Vec<HistoryMessage>, GatewayError>;

    /// Shows the typing indicator in a chat.
    async fn start_typing(&self, chat_id: &ChatId) -> Result<(), GatewayError>;

    /// Hides the typing indicator in a chat.
    async fn stop_typing(&self, chat_id: &ChatId) -> Result<(), GatewayError>;
}

/// A message from the chat history.
///
/// Only `body` and `fromMe` are consumed; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Message text (absent for media-only messages).
    #[serde(default)]
    pub body: Option<String>,
    /// True when the bot's own account sent the message.
    #[serde(default, rename = "fromMe")]
    pub from_me: bool,
}

impl HistoryMessage {
    /// A message sent by the customer.
    pub fn inbound(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            from_me: false,
        }
    }

    /// A message sent by the bot.
    pub fn outbound(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            from_me: true,
        }
    }

    /// Non-blank text of the message, if any.
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Gateway call failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Could not reach the gateway.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway did not answer within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The gateway answered with an unreadable body.
    #[error("decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_message_reads_gateway_fields() {
        let json = r#"[
            {"id": "a", "body": "Olá", "fromMe": true, "timestamp": 1700000000},
            {"id": "b", "body": "Quero simular", "fromMe": false},
            {"id": "c", "hasMedia": true}
        ]"#;
        let messages: Vec<HistoryMessage> = serde_json::from_str(json).unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], HistoryMessage::outbound("Olá"));
        assert_eq!(messages[1], HistoryMessage::inbound("Quero simular"));
        assert_eq!(messages[2].text(), None);
        assert!(!messages[2].from_me);
    }

    #[test]
    fn blank_body_has_no_text() {
        assert_eq!(HistoryMessage::inbound("  ").text(), None);
        assert_eq!(HistoryMessage::inbound("oi").text(), Some("oi"));
    }

    #[test]
    fn gateway_error_displays_correctly() {
        assert_eq!(
            GatewayError::status(502, "bad gateway").to_string(),
            "gateway returned 502: bad gateway"
        );
        assert_eq!(
            GatewayError::Timeout { timeout_secs: 10 }.to_string(),
            "request timed out after 10s"
        );
    }
}
