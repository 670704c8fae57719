//! policy-rag: question answering over a single policy document
//!
//! The document is split into paragraph-aligned chunks at startup. Each
//! question selects the chunk with the most keyword overlap, which is combined
//! with the user's recent conversation into one prompt for a Gemini
//! `generateContent` endpoint.

pub mod chat;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

pub use chat::ChatService;
pub use config::PolicyRagConfig;
pub use error::{Error, Result};
pub use generation::PromptBuilder;
pub use ingestion::{chunk_text, DocumentLoader, ParagraphChunker};
pub use providers::{CompletionGateway, GeminiClient};
pub use retrieval::{find_best_chunk, KeywordRetriever, Retriever};
pub use session::{Session, SessionStore};
pub use types::{
    document::PolicyDocument,
    query::ChatRequest,
    response::{ChatResponse, ErrorResponse},
    session::{Role, Turn},
};
