//! Chat-completion client implementation

use crate::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::{
    DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_MODEL, LlmError, Result, SUMMARY_TEMPERATURE,
};
use std::time::Duration;
use tracing::debug;

/// Connection settings for the summarization service
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL of the OpenAI-compatible API (e.g., "http://localhost:1234/v1")
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token, if the service requires one
    pub api_key: Option<String>,
    /// Language the persona asks the model to answer in
    pub language: String,
    /// Upper bound on a single request
    pub timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Client for an OpenAI-compatible chat-completion endpoint
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    settings: LlmSettings,
    persona: String,
}

impl ChatClient {
    /// Create a client from settings
    ///
    /// No request is made until the first completion.
    pub fn new(settings: LlmSettings) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(settings.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let persona = crate::system_instruction(&settings.language);

        Self {
            client,
            settings,
            persona,
        }
    }

    /// Get the configured model identifier
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Send a chat completion request
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );

        let mut builder = self.client.post(&url).json(request);
        if let Some(ref key) = self.settings.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Send `prompt` under the configured persona and return the generated text
    ///
    /// A reply without choices or with only whitespace is an
    /// [`LlmError::EmptyResponse`].
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(
            self.settings.model.clone(),
            vec![
                ChatMessage::system(self.persona.clone()),
                ChatMessage::user(prompt),
            ],
        )
        .with_temperature(SUMMARY_TEMPERATURE);

        debug!(model = %self.settings.model, prompt_bytes = prompt.len(), "Requesting completion");
        let response = self.chat_completion(&request).await?;

        match response.content().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(LlmError::EmptyResponse),
        }
    }
}
