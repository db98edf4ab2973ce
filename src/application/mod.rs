//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CustomerFlowError, CustomerMessage, CustomerMessageHandler, CustomerMessageResult,
    DispatchReport, InboundDelivery, InboundWebhookHandler, ResponseFlowDispatcher,
    SupportCommand, SupportCommandHandler, SupportCommandResult, WebhookOutcome,
};
