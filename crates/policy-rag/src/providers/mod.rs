//! Completion gateway abstraction and the Gemini implementation

pub mod gateway;
pub mod gemini;

pub use gateway::CompletionGateway;
pub use gemini::GeminiClient;
