//! Knowledge Retriever Port - reference passages for the reply prompt.

use async_trait::async_trait;
use thiserror::Error;

/// Port for looking up reference passages relevant to a customer message.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// Returns at most `limit` passages, best match first.
    async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<KnowledgeChunk>, KnowledgeError>;
}

/// One passage of reference material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeChunk {
    /// File the passage came from.
    pub source: String,
    pub content: String,
}

impl KnowledgeChunk {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }
}

/// Knowledge loading or lookup failures.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid chunking: overlap {overlap} must be smaller than chunk size {size}")]
    InvalidChunking { size: usize, overlap: usize },
}
