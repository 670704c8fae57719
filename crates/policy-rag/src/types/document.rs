//! Policy document type shared read-only across requests

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source formats the loader understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// Markdown file
    Markdown,
    /// Anything else, read as UTF-8 text
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "docx" => Self::Docx,
            "txt" | "text" => Self::Txt,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// The loaded policy text and its chunks
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Where the text was loaded from
    pub source: PathBuf,
    /// Detected format of the source
    pub file_type: FileType,
    /// Normalized full text (non-blank lines joined by `\n`)
    pub text: String,
    /// Paragraph-aligned chunks in document order
    pub chunks: Vec<String>,
}

impl PolicyDocument {
    /// Create a document from already chunked text
    pub fn new(source: impl Into<PathBuf>, file_type: FileType, text: String, chunks: Vec<String>) -> Self {
        Self {
            source: source.into(),
            file_type,
            text,
            chunks,
        }
    }

    /// An empty document, used when the source cannot be loaded
    pub fn empty(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let file_type = FileType::from_path(&source);
        Self::new(source, file_type, String::new(), Vec::new())
    }

    /// True when no text was loaded
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters in the full text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
