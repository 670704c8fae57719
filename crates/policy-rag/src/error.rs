//! Error types for the policy assistant

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::ErrorResponse;

/// Result type alias for policy assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Policy assistant errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied unusable input (empty question, ...)
    #[error("{0}")]
    InvalidInput(String),

    /// Document could not be read or parsed
    #[error("Failed to load document '{path}': {message}")]
    Document { path: String, message: String },

    /// Completion endpoint answered with a non-success status
    #[error("API error {status}: {body}")]
    Gateway { status: u16, body: String },

    /// Completion endpoint did not answer in time
    #[error("API error: request timed out after {0}s")]
    GatewayTimeout(u64),

    /// Transport or decoding failure talking to the completion endpoint
    #[error("LLM error: {0}")]
    Llm(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a document load error
    pub fn document(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Document {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for failures originating at the completion endpoint
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            Error::Gateway { .. } | Error::GatewayTimeout(_) | Error::Llm(_) | Error::Http(_)
        )
    }

    /// HTTP status reported to the chat client
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
