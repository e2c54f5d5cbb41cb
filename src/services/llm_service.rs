use std::time::Instant;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::message::ChatMessage;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion endpoint returned {status}: {body}")]
    Api { status: reqwest::StatusCode, body: String },

    #[error("chat completion response contained no choices")]
    EmptyResponse,
}

/// The language-model collaborator. One call per agent step; callers decide
/// what to do with failures.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Chat-completions client for the OpenRouter API.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    chat_url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        OpenRouterClient {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            chat_url: config::OPENROUTER_CHAT_URL.to_string(),
        }
    }

    pub fn with_chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

#[async_trait]
impl ChatModel for OpenRouterClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let started = Instant::now();
        debug!("Sending {} messages to model {}", messages.len(), model);

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest { model, messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        info!(
            "Chat completion answered in {} ms",
            started.elapsed().as_millis()
        );
        Ok(content)
    }
}
