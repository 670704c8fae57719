//! Question answering over the policy document
//!
//! One call to [`ChatService::ask`] handles one question: pick the excerpt,
//! build the prompt from the user's history, call the completion gateway and
//! record the exchange. The user's session stays locked for the whole call.

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::CompletionGateway;
use crate::retrieval::{KeywordRetriever, Retriever};
use crate::session::SessionStore;
use crate::types::PolicyDocument;

/// Message returned for blank questions
pub const EMPTY_QUESTION: &str = "Empty question";

/// Orchestrates retrieval, prompting, completion and history
pub struct ChatService {
    document: Arc<PolicyDocument>,
    retriever: Arc<dyn Retriever>,
    prompts: PromptBuilder,
    gateway: Arc<dyn CompletionGateway>,
    sessions: Arc<SessionStore>,
    fallback_message: String,
}

impl ChatService {
    /// Create a service using keyword retrieval
    pub fn new(
        document: Arc<PolicyDocument>,
        gateway: Arc<dyn CompletionGateway>,
        sessions: Arc<SessionStore>,
        config: &ChatConfig,
    ) -> Self {
        Self {
            document,
            retriever: Arc::new(KeywordRetriever::new()),
            prompts: PromptBuilder::from_config(config),
            gateway,
            sessions,
            fallback_message: config.fallback_message.clone(),
        }
    }

    /// Replace the retriever
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = retriever;
        self
    }

    /// Answer `question` for `user_id`, returning the trimmed answer
    ///
    /// Blank questions are rejected before any state is touched. A gateway
    /// failure leaves the session unchanged; a successful response without
    /// text is answered with the fallback message, which is recorded like any
    /// other answer.
    pub async fn ask(&self, user_id: &str, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::invalid_input(EMPTY_QUESTION));
        }

        let handle = self.sessions.get_or_create(user_id);
        let mut session = handle.lock().await;

        let context = self.retriever.find_best_chunk(question, &self.document);
        let prompt = self.prompts.build(session.turns(), question, &context);

        tracing::debug!(
            user = %user_id,
            retriever = self.retriever.name(),
            chunks = self.document.chunk_count(),
            excerpt_len = context.len(),
            prompt_len = prompt.len(),
            history = session.len(),
            "Prepared prompt"
        );

        let answer = match self.gateway.complete(&prompt).await {
            Ok(Some(answer)) if !answer.is_empty() => answer,
            Ok(_) => {
                tracing::info!("{} returned no text, using fallback answer", self.gateway.name());
                self.fallback_message.clone()
            }
            Err(e) => {
                tracing::error!(user = %user_id, "Completion via {} failed: {}", self.gateway.name(), e);
                return Err(e);
            }
        };

        let reply = answer.trim().to_string();
        session.push_exchange(question, answer);

        Ok(reply)
    }

    /// The loaded policy document
    pub fn document(&self) -> &PolicyDocument {
        &self.document
    }

    /// Session store backing this service
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Completion gateway in use
    pub fn gateway(&self) -> &Arc<dyn CompletionGateway> {
        &self.gateway
    }
}
