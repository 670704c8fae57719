//! Completion gateway trait

use async_trait::async_trait;

use crate::error::Result;

/// Remote text-generation capability
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API (`generateContent`)
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Generate text for a fully assembled prompt
    ///
    /// `Ok(None)` means the endpoint answered successfully but the response
    /// carried no generated text. Non-success statuses, timeouts and
    /// undecodable bodies are errors.
    async fn complete(&self, prompt: &str) -> Result<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model or endpoint identifier, never containing credentials
    fn model(&self) -> &str;
}
