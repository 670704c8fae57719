//! Chat endpoint

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    Json,
};
use std::net::SocketAddr;

use crate::chat::EMPTY_QUESTION;
use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /chat - Answer a question about the policy document
///
/// The caller's IP address identifies the conversation.
pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Unreadable chat body: {}", rejection);
            return Err(Error::invalid_input(EMPTY_QUESTION));
        }
    };

    let user_id = addr.ip().to_string();
    tracing::info!(user = %user_id, "Question: \"{}\"", request.trimmed());

    let answer = state.chat().ask(&user_id, &request.question).await?;

    Ok(Json(ChatResponse::new(&answer)))
}
