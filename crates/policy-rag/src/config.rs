//! Configuration for the policy assistant
//!
//! Values come from built-in defaults, an optional TOML file, and
//! `POLICY_RAG_*` environment variables, applied in that order.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default answer used when the model response carries no text
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Sorry, that information is not available in the policy document.";

/// Default Gemini generation endpoint
pub const DEFAULT_GATEWAY_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyRagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Policy document source
    pub document: DocumentConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Completion endpoint configuration
    pub gateway: GatewayConfig,
    /// Conversation behaviour
    pub chat: ChatConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Directory holding `index.html` for the chat client
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Policy document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the policy document (.docx or plain text)
    pub path: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("policy.docx"),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_max_len: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_max_len: 1500 }
    }
}

/// Completion endpoint configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Generation endpoint URL
    pub endpoint: String,
    /// API key sent in the `X-goog-api-key` header
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GATEWAY_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Conversation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Answer returned when the model produced no text
    pub fallback_message: String,
    /// Most recent turns (not exchanges) rendered into each prompt; a window
    /// that would open on an assistant turn drops that turn
    pub max_history_turns: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            max_history_turns: 20,
        }
    }
}

impl PolicyRagConfig {
    /// Read a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load defaults, then the optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `POLICY_RAG_*` overrides using the given variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("POLICY_RAG_DOCUMENT_PATH") {
            self.document.path = PathBuf::from(path);
        }
        if let Some(len) = lookup("POLICY_RAG_CHUNK_MAX_LEN") {
            self.chunking.chunk_max_len = len.trim().parse().map_err(|_| {
                Error::Config(format!("POLICY_RAG_CHUNK_MAX_LEN is not a number: {}", len))
            })?;
        }
        if let Some(endpoint) = lookup("POLICY_RAG_GATEWAY_ENDPOINT") {
            self.gateway.endpoint = endpoint;
        }
        if let Some(key) = lookup("POLICY_RAG_API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            self.gateway.api_key = key;
        }
        if let Some(message) = lookup("POLICY_RAG_FALLBACK_MESSAGE") {
            self.chat.fallback_message = message;
        }
        if let Some(host) = lookup("POLICY_RAG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("POLICY_RAG_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                Error::Config(format!("POLICY_RAG_PORT is not a valid port: {}", port))
            })?;
        }
        Ok(())
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_max_len == 0 {
            return Err(Error::Config("chunk_max_len must be greater than zero".to_string()));
        }
        if self.gateway.timeout_secs == 0 {
            return Err(Error::Config("gateway timeout_secs must be greater than zero".to_string()));
        }
        if self.gateway.endpoint.trim().is_empty() {
            return Err(Error::Config("gateway endpoint is empty".to_string()));
        }
        if self.gateway.api_key.trim().is_empty() {
            return Err(Error::Config(
                "gateway API key is not set (use POLICY_RAG_API_KEY or gateway.api_key)".to_string(),
            ));
        }
        Ok(())
    }
}
