//! Keyword knowledge base - Implementation of KnowledgeRetriever over local
//! `.md` / `.txt` files.
//!
//! Files are read once at startup and split into overlapping character
//! windows. Retrieval scores each chunk by how many query terms (longer than
//! two characters) it contains and returns the best ones.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::ports::{KnowledgeChunk, KnowledgeError, KnowledgeRetriever};

/// Chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingOptions {
    /// Window length in characters.
    pub size: usize,
    /// Characters shared by consecutive windows.
    pub overlap: usize,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            size: 800,
            overlap: 150,
        }
    }
}

impl ChunkingOptions {
    pub fn new(size: usize, overlap: usize) -> Result<Self, KnowledgeError> {
        if size == 0 || overlap >= size {
            return Err(KnowledgeError::InvalidChunking { size, overlap });
        }
        Ok(Self { size, overlap })
    }
}

/// In-memory keyword index.
#[derive(Debug, Clone, Default)]
pub struct KeywordKnowledgeBase {
    chunks: Vec<KnowledgeChunk>,
}

impl KeywordKnowledgeBase {
    /// Loads every `.md` / `.txt` file under `dir` (recursively).
    ///
    /// A missing directory yields an empty knowledge base.
    pub fn load(dir: &Path, options: ChunkingOptions) -> Result<Self, KnowledgeError> {
        if !dir.is_dir() {
            tracing::warn!(
                directory = %dir.display(),
                "knowledge directory not found, replies will have no reference context"
            );
            return Ok(Self::default());
        }

        let mut paths = Vec::new();
        collect_text_paths(dir, &mut paths);
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = std::fs::read_to_string(&path).map_err(|source| KnowledgeError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let source = path.strip_prefix(dir).unwrap_or(&path).display().to_string();
            documents.push((source, content));
        }

        let base = Self::from_documents(documents, options);
        tracing::info!(
            directory = %dir.display(),
            chunks = base.len(),
            "knowledge base loaded"
        );
        Ok(base)
    }

    /// Builds an index from `(source, content)` pairs.
    pub fn from_documents<I, S, C>(documents: I, options: ChunkingOptions) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: AsRef<str>,
    {
        let mut chunks = Vec::new();
        for (source, content) in documents {
            let source = source.into();
            for piece in chunk_text(content.as_ref(), options) {
                chunks.push(KnowledgeChunk::new(source.clone(), piece));
            }
        }
        Self { chunks }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn search(&self, query: &str, limit: usize) -> Vec<KnowledgeChunk> {
        if self.chunks.is_empty() || limit == 0 {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();
        let terms: Vec<&str> = query_lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.chars().count() > 2)
            .collect();

        let mut scored: Vec<(&KnowledgeChunk, usize)> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let content_lower = chunk.content.to_lowercase();
                let score = terms.iter().filter(|t| content_lower.contains(*t)).count();
                (score > 0).then_some((chunk, score))
            })
            .collect();

        // Stable sort keeps load order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);
        scored.into_iter().map(|(c, _)| c.clone()).collect()
    }
}

#[async_trait]
impl KnowledgeRetriever for KeywordKnowledgeBase {
    async fn retrieve(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeChunk>, KnowledgeError> {
        Ok(self.search(query, limit))
    }
}

fn collect_text_paths(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_text_paths(&path, out);
        } else if file_type.is_symlink() && path.is_dir() {
            // Symlinked directories may loop back into the tree.
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
        } else if path.is_file() && is_text_file(&path) {
            out.push(path);
        }
    }
}

fn is_text_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("txt")
    )
}

/// Splits `text` into windows of `options.size` characters, each starting
/// `size - overlap` characters after the previous one. Blank windows are
/// dropped.
fn chunk_text(text: &str, options: ChunkingOptions) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = options.size.saturating_sub(options.overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + options.size).min(chars.len());
        let piece: String = chars[start..end].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_options_reject_overlap_not_smaller_than_size() {
        assert!(ChunkingOptions::new(100, 100).is_err());
        assert!(ChunkingOptions::new(0, 0).is_err());
        assert_eq!(ChunkingOptions::new(800, 150).unwrap(), ChunkingOptions::default());
    }

    #[test]
    fn chunk_text_overlaps_windows() {
        let text: String = "abcdefghij".into();
        let chunks = chunk_text(&text, ChunkingOptions::new(4, 2).unwrap());
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "ghij"]);
    }

    #[test]
    fn chunk_text_short_input_is_single_chunk() {
        let chunks = chunk_text("  taxa de juros  ", ChunkingOptions::default());
        assert_eq!(chunks, vec!["taxa de juros"]);
    }

    #[test]
    fn chunk_text_counts_characters_not_bytes() {
        let chunks = chunk_text("ãããããã", ChunkingOptions::new(3, 0).unwrap());
        assert_eq!(chunks, vec!["ããã", "ããã"]);
    }

    #[tokio::test]
    async fn retrieve_ranks_by_term_overlap() {
        let base = KeywordKnowledgeBase::from_documents(
            vec![
                ("juros.md", "A taxa de juros do consignado é menor."),
                ("prazo.md", "O prazo do consignado chega a 84 meses e a taxa é fixa."),
                ("outro.md", "Horário de atendimento comercial."),
            ],
            ChunkingOptions::default(),
        );

        let chunks = base.retrieve("qual a taxa e o prazo do consignado?", 4).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].source, "prazo.md");
        assert_eq!(chunks[1].source, "juros.md");
    }

    #[tokio::test]
    async fn retrieve_respects_limit_and_short_terms() {
        let base = KeywordKnowledgeBase::from_documents(
            vec![("a.md", "um dois"), ("b.md", "um tres")],
            ChunkingOptions::default(),
        );

        assert!(base.retrieve("um", 4).await.unwrap().is_empty());
        assert_eq!(base.retrieve("dois tres", 1).await.unwrap().len(), 1);
        assert!(base.retrieve("dois", 0).await.unwrap().is_empty());
    }

    #[test]
    fn load_reads_markdown_and_text_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("produtos");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("faq.md"), "# FAQ\nPortabilidade de consignado").unwrap();
        std::fs::write(nested.join("inss.txt"), "Aposentados do INSS").unwrap();
        std::fs::write(tmp.path().join("ignorado.pdf"), "binario").unwrap();

        let base = KeywordKnowledgeBase::load(tmp.path(), ChunkingOptions::default()).unwrap();

        assert_eq!(base.len(), 2);
        assert!(base.chunks.iter().any(|c| c.source == "faq.md"));
    }

    #[cfg(unix)]
    #[test]
    fn load_skips_symlinked_directories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("faq.md"), "Portabilidade de consignado").unwrap();
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("loop")).unwrap();

        let base = KeywordKnowledgeBase::load(tmp.path(), ChunkingOptions::default()).unwrap();

        assert_eq!(base.len(), 1);
        assert_eq!(base.chunks[0].source, "faq.md");
    }

    #[test]
    fn load_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let base =
            KeywordKnowledgeBase::load(&tmp.path().join("nao-existe"), ChunkingOptions::default())
                .unwrap();
        assert!(base.is_empty());
    }
}
