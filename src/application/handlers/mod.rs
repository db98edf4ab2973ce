//! Application handlers.
//!
//! ## Commands
//! - Routing a webhook delivery (`InboundWebhookHandler`)
//! - Relaying an operator offer (`SupportCommandHandler`)
//! - Answering a customer message (`CustomerMessageHandler`)
//!
//! `ResponseFlowDispatcher` turns a model reply into customer and support
//! messages.

mod customer_message;
mod inbound_webhook;
mod response_flow;
mod support_command;

pub use customer_message::{
    CustomerFlowError, CustomerMessage, CustomerMessageHandler, CustomerMessageResult,
    DEFAULT_FLOW_TIMEOUT,
};
pub use inbound_webhook::{InboundDelivery, InboundWebhookHandler, WebhookOutcome};
pub use response_flow::{DispatchReport, ResponseFlowDispatcher};
pub use support_command::{SupportCommand, SupportCommandHandler, SupportCommandResult};
