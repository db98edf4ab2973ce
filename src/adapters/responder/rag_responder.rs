//! RagResponder - retrieval-augmented implementation of ConversationResponder.
//!
//! Per customer message:
//! 1. retrieve reference passages for the message
//! 2. render them into the system prompt's `{context}` slot
//! 3. send the recent history window plus the new message to the model
//!
//! Any failure along the way yields the fixed apology text.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::domain::messages::FALLBACK_REPLY;
use crate::domain::tags::TagRules;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, ConversationResponder, HistoryMessage,
    KnowledgeChunk, KnowledgeError, KnowledgeRetriever, Message,
};

const DEFAULT_TEMPLATE: &str = include_str!("default_system_prompt.md");
const CONTEXT_PLACEHOLDER: &str = "{context}";

/// System prompt with tag markers resolved and a `{context}` slot left open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPromptTemplate {
    template: String,
}

impl SystemPromptTemplate {
    /// Built-in template with the given tag markers and trigger phrases.
    pub fn builtin(rules: &TagRules) -> Self {
        Self::from_template(DEFAULT_TEMPLATE, rules)
    }

    /// Template read from a file; it should contain `{context}`.
    pub fn from_file(path: &Path, rules: &TagRules) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if !raw.contains(CONTEXT_PLACEHOLDER) {
            tracing::warn!(
                path = %path.display(),
                "system prompt has no {{context}} placeholder, retrieved passages will be dropped"
            );
        }
        Ok(Self::from_template(&raw, rules))
    }

    pub fn from_template(raw: &str, rules: &TagRules) -> Self {
        let template = raw
            .replace("{simulation_marker}", &rules.simulation_marker)
            .replace("{closure_marker}", &rules.closure_marker)
            .replace("{simulation_trigger}", &rules.simulation_trigger)
            .replace("{closure_trigger}", &rules.closure_trigger);
        Self { template }
    }

    /// Fills the context slot with the retrieved passages.
    pub fn render(&self, chunks: &[KnowledgeChunk]) -> String {
        let context = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.template.replace(CONTEXT_PLACEHOLDER, &context)
    }
}

/// Model and retrieval parameters for the responder.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponderSettings {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// How many of the most recent history entries reach the model.
    pub history_window: usize,
    /// How many passages to retrieve.
    pub top_k: usize,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: None,
            history_window: 6,
            top_k: 4,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ReplyError {
    #[error("knowledge retrieval failed: {0}")]
    Knowledge(#[from] KnowledgeError),
    #[error("model call failed: {0}")]
    Model(#[from] AIError),
    #[error("model returned an empty reply")]
    Empty,
}

/// Retrieval-augmented conversation responder.
pub struct RagResponder {
    provider: Arc<dyn AIProvider>,
    knowledge: Arc<dyn KnowledgeRetriever>,
    prompt: SystemPromptTemplate,
    settings: ResponderSettings,
}

impl RagResponder {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        knowledge: Arc<dyn KnowledgeRetriever>,
        prompt: SystemPromptTemplate,
        settings: ResponderSettings,
    ) -> Self {
        Self {
            provider,
            knowledge,
            prompt,
            settings,
        }
    }

    /// Converts the tail of the chat history to model messages and appends
    /// the new customer message.
    fn build_messages(&self, history: &[HistoryMessage], message: &str) -> Vec<Message> {
        let start = history.len().saturating_sub(self.settings.history_window);
        let mut messages: Vec<Message> = history[start..]
            .iter()
            .filter_map(|entry| {
                entry.text().map(|text| {
                    if entry.from_me {
                        Message::assistant(text)
                    } else {
                        Message::user(text)
                    }
                })
            })
            .collect();
        messages.push(Message::user(message));
        messages
    }

    async fn generate(&self, history: &[HistoryMessage], message: &str) -> Result<String, ReplyError> {
        let passages = self.knowledge.retrieve(message, self.settings.top_k).await?;

        let request = CompletionRequest::new()
            .with_system_prompt(self.prompt.render(&passages))
            .with_messages(self.build_messages(history, message))
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        let response = self.provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(ReplyError::Empty);
        }

        tracing::debug!(
            passages = passages.len(),
            total_tokens = response.usage.total_tokens,
            model = %response.model,
            "reply generated"
        );
        Ok(response.content)
    }
}

#[async_trait]
impl ConversationResponder for RagResponder {
    async fn invoke(&self, history: &[HistoryMessage], message: &str) -> String {
        match self.generate(history, message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "reply pipeline failed, sending fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
