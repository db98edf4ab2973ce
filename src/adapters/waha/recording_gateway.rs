//! Recording gateway for testing.
//!
//! In-memory `MessagingGateway` that records every call in order, serves a
//! canned history and can be told to fail selected operations.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::ChatId;
use crate::ports::{GatewayError, HistoryMessage, MessagingGateway};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Send { chat_id: String, text: String },
    FetchHistory { chat_id: String, limit: u32 },
    StartTyping { chat_id: String },
    StopTyping { chat_id: String },
}

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    Send,
    FetchHistory,
    StartTyping,
    StopTyping,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<GatewayCall>,
    history: Vec<HistoryMessage>,
    failing: HashSet<GatewayOperation>,
}

/// Recording `MessagingGateway` double.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    inner: Arc<Mutex<RecordingState>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// History returned by `get_history_messages` (truncated to `limit`).
    pub fn with_history(self, history: Vec<HistoryMessage>) -> Self {
        self.inner.lock().unwrap().history = history;
        self
    }

    /// Makes every call of `operation` fail with a 503.
    pub fn failing(self, operation: GatewayOperation) -> Self {
        self.inner.lock().unwrap().failing.insert(operation);
        self
    }

    /// All calls, in the order they were made.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// `(chat_id, text)` of every send, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Send { chat_id, text } => Some((chat_id, text)),
                _ => None,
            })
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    fn record(&self, call: GatewayCall, operation: GatewayOperation) -> Result<(), GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(&operation) {
            Err(GatewayError::status(503, "gateway unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::Send {
                chat_id: chat_id.to_string(),
                text: text.to_string(),
            },
            GatewayOperation::Send,
        )
    }

    async fn get_history_messages(
        &self,
        chat_id: &ChatId,
        limit: u32,
    ) -> Result<Vec<HistoryMessage>, GatewayError> {
        self.record(
            GatewayCall::FetchHistory {
                chat_id: chat_id.to_string(),
                limit,
            },
            GatewayOperation::FetchHistory,
        )?;
        let state = self.inner.lock().unwrap();
        Ok(state.history.iter().take(limit as usize).cloned().collect())
    }

    async fn start_typing(&self, chat_id: &ChatId) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::StartTyping {
                chat_id: chat_id.to_string(),
            },
            GatewayOperation::StartTyping,
        )
    }

    async fn stop_typing(&self, chat_id: &ChatId) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::StopTyping {
                chat_id: chat_id.to_string(),
            },
            GatewayOperation::StopTyping,
        )
    }
}
