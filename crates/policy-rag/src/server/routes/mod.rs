//! HTTP routes for the policy assistant

pub mod chat;

use axum::{
    routing::{get, post},
    Router,
};

use crate::providers::CompletionGateway;
use crate::server::state::AppState;

/// Build the chat and info routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/api/info", get(info))
}

/// API info endpoint
async fn info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    let document = state.document();
    let config = state.config();

    axum::Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Policy document Q&A with keyword retrieval and per-user history",
        "document": {
            "path": document.source.display().to_string(),
            "file_type": document.file_type,
            "characters": document.char_count(),
            "chunks": document.chunk_count(),
            "chunk_max_len": config.chunking.chunk_max_len,
        },
        "model": state.chat().gateway().model(),
        "max_history_turns": config.chat.max_history_turns,
        "active_sessions": state.sessions().len(),
        "endpoints": {
            "GET /": "Chat client",
            "POST /chat": "Ask a question: {\"question\": string}",
            "GET /api/info": "Service information",
            "GET /health": "Liveness check"
        }
    }))
}
