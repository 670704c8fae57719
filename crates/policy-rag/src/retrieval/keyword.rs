//! Lexical-overlap retrieval
//!
//! A chunk's score is the number of distinct lowercase words it shares with
//! the question. The highest scoring chunk wins; the first one wins ties. When
//! nothing overlaps, the whole document is returned instead.

use std::collections::HashSet;

use crate::types::PolicyDocument;

/// Selects the excerpt sent to the model for a question
///
/// Implementations may score however they like but must return a single
/// excerpt string for a question and a document.
pub trait Retriever: Send + Sync {
    /// Pick the excerpt for `question`
    fn find_best_chunk(&self, question: &str, document: &PolicyDocument) -> String;

    /// Retriever name for logging
    fn name(&self) -> &str;
}

/// Chunk position and its overlap score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredChunk {
    pub index: usize,
    pub score: usize,
}

/// Keyword-overlap retriever
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRetriever;

impl KeywordRetriever {
    /// Create a new keyword retriever
    pub fn new() -> Self {
        Self
    }

    /// Best chunk by overlap, `None` when every chunk scores zero
    pub fn best_match(&self, question: &str, chunks: &[String]) -> Option<ScoredChunk> {
        let question_words = tokenize(question);
        let mut best: Option<ScoredChunk> = None;
        let mut best_score = 0usize;

        for (index, chunk) in chunks.iter().enumerate() {
            let score = overlap_score(&question_words, chunk);
            // Strictly greater keeps the earliest chunk on ties
            if score > best_score {
                best_score = score;
                best = Some(ScoredChunk { index, score });
            }
        }

        best
    }
}

impl Retriever for KeywordRetriever {
    fn find_best_chunk(&self, question: &str, document: &PolicyDocument) -> String {
        find_best_chunk(question, &document.chunks, &document.text).to_string()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Lowercase whitespace-delimited words, duplicates collapsed
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of distinct question words present in `chunk`
pub fn overlap_score(question_words: &HashSet<String>, chunk: &str) -> usize {
    tokenize(chunk).intersection(question_words).count()
}

/// Best chunk for `question`, or `full_text` when nothing overlaps
pub fn find_best_chunk<'a>(question: &str, chunks: &'a [String], full_text: &'a str) -> &'a str {
    match KeywordRetriever::new().best_match(question, chunks) {
        Some(best) => &chunks[best.index],
        None => full_text,
    }
}
