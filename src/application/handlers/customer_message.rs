//! CustomerMessageHandler - answers a customer message with the model reply.
//!
//! Sequence per message: typing on, fetch history, invoke the responder,
//! dispatch the reply, typing off. Typing off runs even if the inner flow
//! panics or overruns its deadline; both are then reported as errors.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::foundation::ChatId;
use crate::ports::{ConversationResponder, MessagingGateway};

use super::response_flow::{DispatchReport, ResponseFlowDispatcher};

/// A customer message to answer.
#[derive(Debug, Clone)]
pub struct CustomerMessage {
    pub chat_id: ChatId,
    pub body: String,
}

/// Result of answering a customer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerMessageResult {
    /// Entries returned by the history fetch (0 when it failed).
    pub history_len: usize,
    pub dispatch: DispatchReport,
}

/// Failures of the customer flow that escape to the HTTP layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerFlowError {
    #[error("customer flow panicked: {message}")]
    Panicked { message: String },
    #[error("customer flow exceeded {timeout:?}")]
    TimedOut { timeout: Duration },
}

/// Deadline for history, model call and dispatch together.
pub const DEFAULT_FLOW_TIMEOUT: Duration = Duration::from_secs(90);

/// Handler for customer messages.
pub struct CustomerMessageHandler {
    gateway: Arc<dyn MessagingGateway>,
    responder: Arc<dyn ConversationResponder>,
    dispatcher: Arc<ResponseFlowDispatcher>,
    history_limit: u32,
    timeout: Duration,
}

impl CustomerMessageHandler {
    pub fn new(
        gateway: Arc<dyn MessagingGateway>,
        responder: Arc<dyn ConversationResponder>,
        dispatcher: Arc<ResponseFlowDispatcher>,
        history_limit: u32,
    ) -> Self {
        Self {
            gateway,
            responder,
            dispatcher,
            history_limit,
            timeout: DEFAULT_FLOW_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        cmd: CustomerMessage,
    ) -> Result<CustomerMessageResult, CustomerFlowError> {
        let _ = self.gateway.start_typing(&cmd.chat_id).await;

        let flow = AssertUnwindSafe(self.respond(&cmd)).catch_unwind();
        let outcome = tokio::time::timeout(self.timeout, flow).await;

        let _ = self.gateway.stop_typing(&cmd.chat_id).await;

        match outcome {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(payload)) => {
                let message = panic_message(&*payload);
                tracing::error!(chat_id = %cmd.chat_id, panic = %message, "customer flow panicked");
                Err(CustomerFlowError::Panicked { message })
            }
            Err(_) => {
                tracing::error!(
                    chat_id = %cmd.chat_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "customer flow timed out"
                );
                Err(CustomerFlowError::TimedOut {
                    timeout: self.timeout,
                })
            }
        }
    }

    async fn respond(&self, cmd: &CustomerMessage) -> CustomerMessageResult {
        let history = match self
            .gateway
            .get_history_messages(&cmd.chat_id, self.history_limit)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(chat_id = %cmd.chat_id, error = %e, "history unavailable, replying without it");
                Vec::new()
            }
        };

        let reply = self.responder.invoke(&history, &cmd.body).await;

        let dispatch = self
            .dispatcher
            .dispatch(&cmd.chat_id, &cmd.chat_id.sender_id(), &reply)
            .await;

        CustomerMessageResult {
            history_len: history.len(),
            dispatch,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
