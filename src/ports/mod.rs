//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `MessagingGateway` - send text, read history, typing indicator
//! - `ConversationResponder` - infallible reply pipeline for customer messages
//! - `AIProvider` - chat-completion model behind the responder
//! - `KnowledgeRetriever` - reference passages for the reply prompt

mod ai_provider;
mod conversation_responder;
mod knowledge_retriever;
mod messaging_gateway;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use conversation_responder::ConversationResponder;
pub use knowledge_retriever::{KnowledgeChunk, KnowledgeError, KnowledgeRetriever};
pub use messaging_gateway::{GatewayError, HistoryMessage, MessagingGateway};
