//! InboundWebhookHandler - routes one webhook delivery.
//!
//! Deliveries from allowlisted operators are offer commands; everything
//! else is a customer message. Group chats and deliveries without sender
//! or text are acknowledged and dropped before any gateway call.

use std::sync::Arc;
use tracing::Instrument as _;

use crate::domain::foundation::{DeliveryId, SupportAllowlist};
use crate::domain::inbound::{IgnoreReason, InboundEvent, InboundRoute};

use super::customer_message::{
    CustomerFlowError, CustomerMessage, CustomerMessageHandler, CustomerMessageResult,
};
use super::support_command::{SupportCommand, SupportCommandHandler, SupportCommandResult};

/// Raw fields of one webhook delivery.
#[derive(Debug, Clone, Default)]
pub struct InboundDelivery {
    pub from: Option<String>,
    pub body: Option<String>,
}

/// How a delivery was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    Ignored(IgnoreReason),
    /// Operator offer relayed.
    SupportOk(SupportCommandResult),
    /// Operator command was incomplete.
    SupportFailed(SupportCommandResult),
    CustomerOk(CustomerMessageResult),
}

/// Entry point for webhook deliveries.
pub struct InboundWebhookHandler {
    allowlist: Arc<SupportAllowlist>,
    support: SupportCommandHandler,
    customer: CustomerMessageHandler,
}

impl InboundWebhookHandler {
    pub fn new(
        allowlist: Arc<SupportAllowlist>,
        support: SupportCommandHandler,
        customer: CustomerMessageHandler,
    ) -> Self {
        Self {
            allowlist,
            support,
            customer,
        }
    }

    pub async fn handle(&self, delivery: InboundDelivery) -> Result<WebhookOutcome, CustomerFlowError> {
        let delivery_id = DeliveryId::new();
        let span = tracing::info_span!("delivery", delivery_id = %delivery_id);
        self.route(delivery).instrument(span).await
    }

    async fn route(&self, delivery: InboundDelivery) -> Result<WebhookOutcome, CustomerFlowError> {
        let event = match InboundEvent::from_parts(delivery.from.as_deref(), delivery.body.as_deref()) {
            Ok(event) => event,
            Err(reason) => {
                tracing::debug!(%reason, "delivery ignored");
                return Ok(WebhookOutcome::Ignored(reason));
            }
        };

        let route = event.route(&self.allowlist);
        tracing::info!(
            chat_id = %event.chat_id,
            sender_id = %event.sender_id(),
            route = ?route,
            "inbound message"
        );

        match route {
            InboundRoute::Support => {
                let result = self
                    .support
                    .handle(SupportCommand {
                        operator_chat: event.chat_id,
                        body: event.body,
                    })
                    .await;
                if result.is_offer_sent() {
                    Ok(WebhookOutcome::SupportOk(result))
                } else {
                    Ok(WebhookOutcome::SupportFailed(result))
                }
            }
            InboundRoute::Customer => {
                let result = self
                    .customer
                    .handle(CustomerMessage {
                        chat_id: event.chat_id,
                        body: event.body,
                    })
                    .await?;
                Ok(WebhookOutcome::CustomerOk(result))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::responder::ScriptedResponder;
    use crate::adapters::waha::RecordingGateway;
    use crate::application::handlers::ResponseFlowDispatcher;
    use crate::domain::tags::TagRules;
    use crate::ports::MessagingGateway;

    fn handler(gateway: &RecordingGateway, responder: &ScriptedResponder) -> InboundWebhookHandler {
        let allowlist =
            Arc::new(SupportAllowlist::new(["215470020018431", "556282027373"]).unwrap());
        let gateway: Arc<dyn MessagingGateway> = Arc::new(gateway.clone());
        let dispatcher = Arc::new(ResponseFlowDispatcher::new(
            gateway.clone(),
            TagRules::default(),
            allowlist.alert_chat_id("lid"),
        ));
        InboundWebhookHandler::new(
            allowlist,
            SupportCommandHandler::new(gateway.clone()),
            CustomerMessageHandler::new(gateway, Arc::new(responder.clone()), dispatcher, 10),
        )
    }

    fn delivery(from: &str, body: &str) -> InboundDelivery {
        InboundDelivery {
            from: Some(from.to_string()),
            body: Some(body.to_string()),
        }
    }

    #[tokio::test]
    async fn group_chat_is_ignored_without_gateway_calls() {
        let gateway = RecordingGateway::new();
        let responder = ScriptedResponder::new();

        let outcome = handler(&gateway, &responder)
            .handle(delivery("120363025@g.us", "Oi pessoal"))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored(IgnoreReason::GroupChat));
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(responder.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_fields_are_ignored() {
        let gateway = RecordingGateway::new();
        let handler = handler(&gateway, &ScriptedResponder::new());

        let outcome = handler.handle(InboundDelivery::default()).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::Ignored(IgnoreReason::MissingSender));

        let outcome = handler.handle(delivery("5511@c.us", "   ")).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::Ignored(IgnoreReason::EmptyBody));

        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn operator_sender_takes_support_path() {
        let gateway = RecordingGateway::new();
        let responder = ScriptedResponder::new();

        let outcome = handler(&gateway, &responder)
            .handle(delivery("556282027373@c.us", "111, 5562999990000, 750"))
            .await
            .unwrap();

        assert!(matches!(outcome, WebhookOutcome::SupportOk(_)));
        assert_eq!(responder.call_count(), 0);
        assert_eq!(gateway.sent()[0].0, "5562999990000@c.us");
    }

    #[tokio::test]
    async fn incomplete_operator_command_fails() {
        let gateway = RecordingGateway::new();

        let outcome = handler(&gateway, &ScriptedResponder::new())
            .handle(delivery("215470020018431@lid", "CPF: 123, VALOR: 500"))
            .await
            .unwrap();

        assert!(matches!(outcome, WebhookOutcome::SupportFailed(_)));
    }

    #[tokio::test]
    async fn customer_sender_takes_model_path() {
        let gateway = RecordingGateway::new();
        let responder = ScriptedResponder::new().with_reply("Olá!");

        let outcome = handler(&gateway, &responder)
            .handle(delivery("5511988887777@c.us", "Oi"))
            .await
            .unwrap();

        assert!(matches!(outcome, WebhookOutcome::CustomerOk(_)));
        assert_eq!(responder.call_count(), 1);
    }

    #[tokio::test]
    async fn customer_panic_surfaces_as_error() {
        let gateway = RecordingGateway::new();
        let responder = ScriptedResponder::new().with_panic("boom");

        let result = handler(&gateway, &responder)
            .handle(delivery("5511988887777@c.us", "Oi"))
            .await;

        assert!(matches!(result, Err(CustomerFlowError::Panicked { .. })));
    }
}
