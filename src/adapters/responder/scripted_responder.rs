//! Scripted responder for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::{ConversationResponder, HistoryMessage};

/// A recorded `invoke` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderCall {
    pub history: Vec<HistoryMessage>,
    pub message: String,
}

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Panic(String),
}

/// `ConversationResponder` double returning queued replies in order.
///
/// Once the queue is empty the default reply is returned. A queued panic
/// lets tests exercise the typing-indicator release path.
#[derive(Debug, Clone)]
pub struct ScriptedResponder {
    script: Arc<Mutex<VecDeque<Script>>>,
    default_reply: String,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<ResponderCall>>>,
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: "Olá! Como posso ajudar?".to_string(),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ScriptedResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Script::Reply(reply.into()));
        self
    }

    /// Makes the next invocation panic with `message`.
    pub fn with_panic(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Script::Panic(message.into()));
        self
    }

    /// Sleeps before every reply, simulating a slow model.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ResponderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationResponder for ScriptedResponder {
    async fn invoke(&self, history: &[HistoryMessage], message: &str) -> String {
        self.calls.lock().unwrap().push(ResponderCall {
            history: history.to_vec(),
            message: message.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Script::Reply(reply)) => reply,
            Some(Script::Panic(message)) => panic!("{}", message),
            None => self.default_reply.clone(),
        }
    }
}
