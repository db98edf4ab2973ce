//! SupportCommandHandler - relays an operator's offer to the customer.

use std::sync::Arc;

use crate::domain::extraction::OfferPayload;
use crate::domain::foundation::{ChatId, CustomerChannel};
use crate::domain::messages;
use crate::ports::MessagingGateway;

/// Command issued by an allowlisted operator.
#[derive(Debug, Clone)]
pub struct SupportCommand {
    /// Chat the operator wrote from; receives the confirmation or prompt.
    pub operator_chat: ChatId,
    /// Free-form command text.
    pub body: String,
}

/// Result of a support command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportCommandResult {
    /// The offer went out to the customer channel.
    OfferSent {
        customer_chat_id: ChatId,
        amount: String,
        customer_delivered: bool,
        confirmation_delivered: bool,
    },
    /// Fields were missing; the operator was asked to resend.
    Incomplete { prompt_delivered: bool },
}

impl SupportCommandResult {
    pub fn is_offer_sent(&self) -> bool {
        matches!(self, SupportCommandResult::OfferSent { .. })
    }
}

/// Handler for operator offer commands.
///
/// Gateway failures are reported in the result and never abort or retry.
pub struct SupportCommandHandler {
    gateway: Arc<dyn MessagingGateway>,
}

impl SupportCommandHandler {
    pub fn new(gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: SupportCommand) -> SupportCommandResult {
        let payload = OfferPayload::from_command(&cmd.body);

        let resolved = payload.complete().and_then(|offer| {
            CustomerChannel::resolve(&offer.phone).map(|channel| (offer, channel))
        });

        let Some((offer, channel)) = resolved else {
            tracing::info!(
                operator = %cmd.operator_chat,
                has_identifier = payload.identifier.is_some(),
                has_phone = payload.phone.is_some(),
                has_amount = payload.amount.is_some(),
                "support command incomplete"
            );
            let prompt_delivered = self
                .gateway
                .send_message(&cmd.operator_chat, messages::INCOMPLETE_COMMAND)
                .await
                .is_ok();
            return SupportCommandResult::Incomplete { prompt_delivered };
        };

        let customer_delivered = self
            .gateway
            .send_message(&channel.chat_id, &messages::offer(&offer.amount))
            .await
            .is_ok();

        let confirmation_delivered = self
            .gateway
            .send_message(
                &cmd.operator_chat,
                &messages::offer_confirmation(&offer.amount, &channel.digits),
            )
            .await
            .is_ok();

        tracing::info!(
            operator = %cmd.operator_chat,
            customer = %channel.chat_id,
            amount = %offer.amount,
            customer_delivered,
            "offer relayed to customer"
        );

        SupportCommandResult::OfferSent {
            customer_chat_id: channel.chat_id,
            amount: offer.amount,
            customer_delivered,
            confirmation_delivered,
        }
    }
}
