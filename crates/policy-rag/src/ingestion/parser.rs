//! Policy document loading
//!
//! Loading never fails startup: a missing or unreadable source degrades to an
//! empty document and the reason is logged.

use std::path::Path;

use super::chunker::ParagraphChunker;
use crate::error::{Error, Result};
use crate::types::{FileType, PolicyDocument};

/// Loads the policy source into a chunked [`PolicyDocument`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader {
    chunker: ParagraphChunker,
}

impl DocumentLoader {
    /// Create a loader that chunks with the given bound
    pub fn new(chunk_max_len: usize) -> Self {
        Self {
            chunker: ParagraphChunker::new(chunk_max_len),
        }
    }

    /// Load and chunk the document, degrading to empty on failure
    pub fn load(&self, path: &Path) -> PolicyDocument {
        match Self::read_text(path) {
            Ok(text) => {
                let chunks = self.chunker.chunk(&text);
                tracing::info!(
                    "Loaded policy document {} ({} chars, {} chunks)",
                    path.display(),
                    text.chars().count(),
                    chunks.len()
                );
                PolicyDocument::new(path, FileType::from_path(path), text, chunks)
            }
            Err(e) => {
                tracing::warn!("{}; continuing with an empty policy document", e);
                PolicyDocument::empty(path)
            }
        }
    }

    /// Build a document from text already in memory
    pub fn from_text(&self, source: &Path, text: &str) -> PolicyDocument {
        let text = normalize_lines(text);
        let chunks = self.chunker.chunk(&text);
        PolicyDocument::new(source, FileType::from_path(source), text, chunks)
    }

    /// Extract normalized plain text from a file
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::document(path.display().to_string(), "file not found"));
        }

        let raw = match FileType::from_path(path) {
            FileType::Docx => {
                let data = std::fs::read(path)
                    .map_err(|e| Error::document(path.display().to_string(), e.to_string()))?;
                Self::parse_docx(&data)
                    .map_err(|e| Error::document(path.display().to_string(), e.to_string()))?
            }
            FileType::Txt | FileType::Markdown | FileType::Unknown => {
                std::fs::read_to_string(path)
                    .map_err(|e| Error::document(path.display().to_string(), e.to_string()))?
            }
        };

        Ok(normalize_lines(&raw))
    }

    /// Extract paragraph text from DOCX bytes, one paragraph per line
    fn parse_docx(data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::internal(e.to_string()))?;

        let mut content = String::new();

        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                Self::push_paragraph_text(&p.children, &mut content);
                content.push('\n');
            }
        }

        Ok(content)
    }

    /// Append run text in document order, descending into hyperlinks
    fn push_paragraph_text(children: &[docx_rs::ParagraphChild], content: &mut String) {
        for child in children {
            match child {
                docx_rs::ParagraphChild::Run(run) => {
                    for child in &run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            content.push_str(&t.text);
                        }
                    }
                }
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    Self::push_paragraph_text(&link.children, content);
                }
                _ => {}
            }
        }
    }
}

/// Trim every line, drop blank ones, and join the rest with `\n`
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
