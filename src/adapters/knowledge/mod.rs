//! Knowledge retriever adapters.

mod keyword_knowledge_base;

pub use keyword_knowledge_base::{ChunkingOptions, KeywordKnowledgeBase};
