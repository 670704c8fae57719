//! Chat response types

use serde::{Deserialize, Serialize};

/// Successful `POST /chat` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
}

impl ChatResponse {
    /// Create a response, trimming the answer
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.trim().to_string(),
        }
    }
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
