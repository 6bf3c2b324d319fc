//! Chat-completion client for the Groq API.
//!
//! Groq speaks the OpenAI chat-completions wire format, so the request and
//! response shapes here work against any compatible endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LlmConfig;

/// Errors raised while talking to the completion API.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    MalformedResponse(String),

    #[error("response contained no choices")]
    EmptyResponse,
}

/// One completion call: a single user-role message plus sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Handle to a remote LLM that turns a prompt into text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the raw text of the first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// Groq API connection settings.
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    /// Base URL, e.g. `https://api.groq.com/openai/v1`.
    pub base_url: String,
    pub timeout: Duration,
}

impl GroqConfig {
    /// Build from the LLM config section. `None` when no credential is set.
    pub fn from_llm_config(llm: &LlmConfig) -> Option<Self> {
        llm.api_key.as_ref().map(|key| Self {
            api_key: key.clone(),
            base_url: llm.base_url.clone(),
            timeout: llm.timeout(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Completion client backed by the Groq HTTP API.
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

impl GroqClient {
    /// Create a new client with a bounded request timeout.
    pub fn new(config: GroqConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn classify(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.config.timeout.as_secs())
        } else {
            CompletionError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let chat_response: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyResponse)?;

        choice.message.content.ok_or_else(|| {
            CompletionError::MalformedResponse("choice has no message content".to_string())
        })
    }
}
