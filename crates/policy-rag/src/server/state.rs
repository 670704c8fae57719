//! Application state for the policy assistant server

use std::sync::Arc;

use crate::chat::ChatService;
use crate::config::PolicyRagConfig;
use crate::error::Result;
use crate::ingestion::DocumentLoader;
use crate::providers::{CompletionGateway, GeminiClient};
use crate::session::SessionStore;
use crate::types::PolicyDocument;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: PolicyRagConfig,
    /// Question answering pipeline
    chat: ChatService,
}

impl AppState {
    /// Load the document and connect the Gemini gateway
    pub async fn new(config: PolicyRagConfig) -> Result<Self> {
        tracing::info!("Initializing policy assistant state...");

        let loader = DocumentLoader::new(config.chunking.chunk_max_len);
        let path = config.document.path.clone();
        let document = tokio::task::spawn_blocking(move || loader.load(&path))
            .await
            .map_err(|e| crate::error::Error::internal(format!("Document loader panicked: {}", e)))?;

        if document.is_empty() {
            tracing::warn!(
                "Policy document {} is empty; answers will have no excerpt",
                config.document.path.display()
            );
        }

        let gateway = Arc::new(GeminiClient::new(&config.gateway)?);
        tracing::info!("Gemini gateway initialized (model: {})", gateway.model());

        Ok(Self::from_parts(config, document, gateway))
    }

    /// Assemble state from an already loaded document and a gateway
    pub fn from_parts(
        config: PolicyRagConfig,
        document: PolicyDocument,
        gateway: Arc<dyn CompletionGateway>,
    ) -> Self {
        let chat = ChatService::new(
            Arc::new(document),
            gateway,
            Arc::new(SessionStore::new()),
            &config.chat,
        );

        Self {
            inner: Arc::new(AppStateInner { config, chat }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &PolicyRagConfig {
        &self.inner.config
    }

    /// Get the chat service
    pub fn chat(&self) -> &ChatService {
        &self.inner.chat
    }

    /// Get the loaded policy document
    pub fn document(&self) -> &PolicyDocument {
        self.inner.chat.document()
    }

    /// Get the session store
    pub fn sessions(&self) -> &Arc<SessionStore> {
        self.inner.chat.sessions()
    }
}
