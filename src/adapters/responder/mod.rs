//! Conversation responder adapters.
//!
//! - `RagResponder` - knowledge retrieval + chat model, apology on failure
//! - `ScriptedResponder` - queued replies for tests

mod rag_responder;
mod scripted_responder;

pub use rag_responder::{RagResponder, ResponderSettings, SystemPromptTemplate};
pub use scripted_responder::{ResponderCall, ScriptedResponder};
