//! Excerpt retrieval over the policy chunks

mod keyword;

pub use keyword::{find_best_chunk, overlap_score, tokenize, KeywordRetriever, Retriever, ScoredChunk};
