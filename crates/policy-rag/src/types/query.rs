//! Chat request types

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer; a missing field reads as empty
    #[serde(default)]
    pub question: String,
}

impl ChatRequest {
    /// The question with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.question.trim()
    }
}
