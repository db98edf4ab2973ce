//! Knowledge base configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Knowledge base configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// Directory holding `.md` / `.txt` reference files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Chunk length in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Passages retrieved per customer message
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl KnowledgeConfig {
    /// Validate knowledge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(ValidationError::InvalidChunking);
        }
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./knowledge")
}

fn default_chunk_size() -> usize {
    800
}

fn default_chunk_overlap() -> usize {
    150
}

fn default_top_k() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_defaults() {
        let config = KnowledgeConfig::default();
        assert_eq!(config.chunk_size, 800);
        assert_eq!(config.chunk_overlap, 150);
        assert_eq!(config.top_k, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_overlap_not_below_size() {
        let config = KnowledgeConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunking));
    }
}
