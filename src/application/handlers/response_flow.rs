//! ResponseFlowDispatcher - turns a model reply into gateway side effects.
//!
//! The customer only ever sees the tag-stripped reply. A detected control
//! tag raises an alert on the primary support channel, always after the
//! customer message.

use std::sync::Arc;

use crate::domain::extraction::ClosurePayload;
use crate::domain::foundation::{ChatId, SenderId};
use crate::domain::messages;
use crate::domain::tags::{strip_tags, TagKind, TagRules};
use crate::ports::MessagingGateway;

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Control tag acted on, if any.
    pub tag: Option<TagKind>,
    /// `None` when the cleaned reply was empty and nothing was sent.
    pub customer_delivered: Option<bool>,
    /// `None` when no alert was raised.
    pub alert_delivered: Option<bool>,
}

/// Dispatcher for model replies.
pub struct ResponseFlowDispatcher {
    gateway: Arc<dyn MessagingGateway>,
    rules: TagRules,
    alert_chat: ChatId,
}

impl ResponseFlowDispatcher {
    /// `alert_chat` is the primary support channel.
    pub fn new(gateway: Arc<dyn MessagingGateway>, rules: TagRules, alert_chat: ChatId) -> Self {
        Self {
            gateway,
            rules,
            alert_chat,
        }
    }

    pub fn alert_chat(&self) -> &ChatId {
        &self.alert_chat
    }

    pub async fn dispatch(
        &self,
        customer_chat: &ChatId,
        sender: &SenderId,
        reply: &str,
    ) -> DispatchReport {
        let cleaned = strip_tags(reply);
        let tag = self.rules.classify(reply);

        // Payload extraction works on the raw reply, tags included.
        let alert = tag.map(|kind| match kind {
            TagKind::SimulationAlert => {
                messages::simulation_alert(&self.rules.simulation_note(reply), sender)
            }
            TagKind::ClosureAlert => {
                messages::closure_alert(&ClosurePayload::from_reply(reply), sender)
            }
        });

        let customer_delivered = if cleaned.is_empty() {
            tracing::warn!(chat_id = %customer_chat, "reply was only control tags, nothing sent to customer");
            None
        } else {
            Some(self.gateway.send_message(customer_chat, &cleaned).await.is_ok())
        };

        let alert_delivered = match alert {
            Some(text) => {
                tracing::info!(
                    tag = ?tag,
                    sender_id = %sender,
                    alert_chat = %self.alert_chat,
                    "control tag detected, alerting support"
                );
                Some(self.gateway.send_message(&self.alert_chat, &text).await.is_ok())
            }
            None => None,
        };

        DispatchReport {
            tag,
            customer_delivered,
            alert_delivered,
        }
    }
}
