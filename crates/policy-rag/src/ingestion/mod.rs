//! Document loading and chunking

mod chunker;
mod parser;

pub use chunker::{chunk_text, ParagraphChunker};
pub use parser::{normalize_lines, DocumentLoader};
