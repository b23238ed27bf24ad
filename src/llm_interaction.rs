use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::Config;
use crate::conversation::Role;
use crate::error::CompletionError;

/// One message of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Boundary to the hosted chat-completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `messages` and returns the generated text of the first choice.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

// Structures matching the OpenAI-compatible /chat/completions endpoint
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: String,
}

/// Groq (or any OpenAI-compatible) chat completions over HTTP.
///
/// No request timeout is configured: a stalled provider blocks the turn until
/// the connection itself gives up.
pub struct GroqClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl GroqClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    #[instrument(skip(self, messages), fields(model = %self.model, messages = messages.len()))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request_payload = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(%status, %body, "Completion API request failed");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::malformed(format!("{} in body {}", e, body)))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::malformed("response contained no choices"))?;

        debug!(chars = answer.len(), "Received completion");
        Ok(answer)
    }
}
