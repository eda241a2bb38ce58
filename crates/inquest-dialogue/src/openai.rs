//! OpenAI-compatible chat-completion provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::provider::{ProviderError, TextGenerator};

/// Chat message on the OpenAI wire.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

/// Provider speaking the OpenAI chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
}

impl OpenAiGenerator {
    /// Creates a provider against the given base URL (trailing slash
    /// tolerated).
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if the API key is empty, and
    /// `ProviderError::Transport` if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        max_tokens: Option<u32>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::Config("OpenAI API key is required".to_owned()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model,
            max_tokens,
        })
    }

    /// Re-parses the serialized transcript into chat messages. A prompt
    /// that is not a JSON message array degrades to one user message.
    fn to_chat_messages(prompt: &str) -> Vec<ChatMessage> {
        match serde_json::from_str::<Vec<ChatMessage>>(prompt) {
            Ok(messages) if !messages.is_empty() => messages,
            _ => vec![ChatMessage {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            }],
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: Self::to_chat_messages(prompt),
            temperature: 0.7,
            max_tokens: self.max_tokens,
            stream: false,
            response_format: ResponseFormat { kind: "json_object" },
        };

        tracing::debug!(model = %self.model, "requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        let choice = body.choices.into_iter().next().ok_or(ProviderError::EmptyCompletion)?;
        Ok(choice.message.content)
    }

    async fn is_available(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ModelsResponse = response.json().await?;
        if body.data.iter().any(|m| m.id == self.model) {
            Ok(())
        } else {
            Err(ProviderError::ModelUnavailable(self.model.clone()))
        }
    }
}
