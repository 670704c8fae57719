//! Prompt assembly for the completion endpoint

pub mod prompt;

pub use prompt::{system_instructions, PromptBuilder};
