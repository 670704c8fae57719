//! Prompt template for policy questions
//!
//! The layout is fixed: instructions, the fenced excerpt, the transcript of
//! prior turns, then the new question and an `Assistant:` cue.

use crate::config::{ChatConfig, DEFAULT_FALLBACK_MESSAGE};
use crate::types::{Role, Turn};

/// Fence around the policy excerpt
const EXCERPT_FENCE: &str = "\"\"\"";

/// Instructions restricting the model to the excerpt
pub fn system_instructions(fallback_message: &str) -> String {
    format!(
        "You are a helpful assistant who ONLY answers questions based on the provided policy document excerpt. \
If information is not found in the excerpt, respond politely with: '{fallback}' \
Be clear, concise, and professional.",
        fallback = fallback_message
    )
}

/// Builds the single prompt string sent for each question
///
/// Only the newest `max_history_turns` turns are rendered; older turns stay in
/// the session but are left out of the prompt.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    instructions: String,
    max_history_turns: usize,
}

impl PromptBuilder {
    /// Create a builder with the given fallback phrase and history window
    pub fn new(fallback_message: &str, max_history_turns: usize) -> Self {
        Self {
            instructions: system_instructions(fallback_message),
            max_history_turns,
        }
    }

    /// Create a builder from chat configuration
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(&config.fallback_message, config.max_history_turns)
    }

    /// Instruction block at the top of every prompt
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// History window size in turns
    pub fn max_history_turns(&self) -> usize {
        self.max_history_turns
    }

    /// Compose instructions, excerpt, history and question
    pub fn build(&self, history: &[Turn], question: &str, context: &str) -> String {
        let start = history.len().saturating_sub(self.max_history_turns);
        let mut window = &history[start..];
        // An odd window can cut an exchange; never open on a bare answer
        if window.first().is_some_and(|turn| turn.role == Role::Assistant) {
            window = &window[1..];
        }

        let mut prompt = String::with_capacity(
            self.instructions.len() + context.len() + question.len() + 128,
        );

        prompt.push_str(&self.instructions);
        prompt.push_str("\n\n");

        prompt.push_str("Policy Document excerpt:\n");
        prompt.push_str(EXCERPT_FENCE);
        prompt.push('\n');
        prompt.push_str(context);
        prompt.push('\n');
        prompt.push_str(EXCERPT_FENCE);
        prompt.push_str("\n\n");

        prompt.push_str("Conversation history:\n");
        for turn in window {
            prompt.push_str(&turn.render());
            prompt.push('\n');
        }

        prompt.push_str(&format!("User: {}\nAssistant:", question));

        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MESSAGE, ChatConfig::default().max_history_turns)
    }
}
