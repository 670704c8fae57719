//! Paragraph-aligned text chunking

/// Splits text into chunks along line boundaries
///
/// Lines are accumulated greedily while the buffer plus the next line and its
/// separator stays within `max_len` characters. A single line longer than
/// `max_len` is emitted whole as its own chunk, so the bound is not enforced
/// inside one paragraph.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphChunker {
    /// Maximum chunk length in characters
    max_len: usize,
}

impl ParagraphChunker {
    /// Create a new chunker
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Configured bound
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Chunk text into an ordered list of non-empty chunks
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        // Character count of `current`, which always ends in '\n' when non-empty
        let mut current_len = 0usize;

        for paragraph in text.split('\n') {
            let paragraph_len = paragraph.chars().count();

            if current_len + paragraph_len + 1 <= self.max_len {
                current.push_str(paragraph);
                current.push('\n');
                current_len += paragraph_len + 1;
            } else {
                Self::flush(&mut chunks, &current);
                current.clear();
                current.push_str(paragraph);
                current.push('\n');
                current_len = paragraph_len + 1;
            }
        }

        Self::flush(&mut chunks, &current);

        chunks
    }

    fn flush(chunks: &mut Vec<String>, buffer: &str) {
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new(1500)
    }
}

/// Chunk `text` with the given bound
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    ParagraphChunker::new(max_len).chunk(text)
}
