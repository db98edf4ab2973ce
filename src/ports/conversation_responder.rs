//! Conversation Responder Port - produces the bot's reply to a customer.

use async_trait::async_trait;

use super::HistoryMessage;

/// Port for the reply pipeline (retrieval + model invocation).
///
/// Implementations never fail: on any internal error they return a fixed
/// apology so the caller always has text to dispatch. The reply may contain
/// embedded control tags.
#[async_trait]
pub trait ConversationResponder: Send + Sync {
    async fn invoke(&self, history: &[HistoryMessage], message: &str) -> String;
}
