//! Gemini client for answer generation via the Generative Language API

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::gateway::CompletionGateway;
use crate::config::GatewayConfig;
use crate::error::{Error, Result};

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-goog-api-key";

/// JSON pointer to the generated answer
const ANSWER_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Gemini `generateContent` client
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client from gateway configuration
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let url = reqwest::Url::parse(&config.endpoint)
            .map_err(|e| Error::Config(format!("Invalid gateway endpoint {}: {}", config.endpoint, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            model: model_from_url(&url),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::GatewayTimeout(self.timeout_secs)
        } else {
            Error::Llm(format!("Gemini request failed: {}", err))
        }
    }
}

/// Last path segment without the `:method` suffix, e.g. `gemini-2.0-flash`
fn model_from_url(url: &reqwest::Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(|last| last.split(':').next().unwrap_or(last).to_string())
        .filter(|model| !model.is_empty())
        .unwrap_or_else(|| url.host_str().unwrap_or("unknown").to_string())
}

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Pull the generated text out of a response body
///
/// Any shape other than a string at the answer path yields `None`.
pub fn extract_answer(body: &Value) -> Option<String> {
    body.pointer(ANSWER_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl CompletionGateway for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!("Gemini returned {}", status);
            return Err(Error::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| Error::Llm(format!("Failed to parse Gemini response: {}", e)))?;

        let answer = extract_answer(&value);
        if answer.is_none() {
            tracing::debug!("Gemini response carried no text at {}", ANSWER_POINTER);
        }

        Ok(answer)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
