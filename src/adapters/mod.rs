//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `waha` - WAHA messaging gateway (plus a recording double)
//! - `ai` - OpenAI-compatible chat model (plus a mock)
//! - `knowledge` - keyword index over local reference files
//! - `responder` - retrieval-augmented reply pipeline
//! - `http` - axum webhook routes

pub mod ai;
pub mod http;
pub mod knowledge;
pub mod responder;
pub mod waha;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use http::{webhook_router, WebhookAppState};
pub use knowledge::{ChunkingOptions, KeywordKnowledgeBase};
pub use responder::{RagResponder, ResponderSettings, ScriptedResponder, SystemPromptTemplate};
pub use waha::{GatewayCall, RecordingGateway, WahaConfig, WahaGateway};
