//! Request and response types for the chat-completion API

use serde::{Deserialize, Serialize};

/// Chat message for completions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author (system, user, assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model to use for completion
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
        }
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// One generated alternative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Index of the choice
    #[serde(default)]
    pub index: u32,
    /// Generated message; some servers omit it on content filtering
    #[serde(default)]
    pub message: Option<ChatMessage>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model that produced the response
    #[serde(default)]
    pub model: String,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Text of the first choice, if any
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .map(|message| message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_temperature() {
        let request = ChatRequest::new("m", vec![ChatMessage::user("hi")]);
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_request_with_temperature() {
        let request = ChatRequest::new("m", vec![ChatMessage::user("hi")]).with_temperature(0.25);
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["temperature"], 0.25);
    }

    #[test]
    fn test_response_content_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"first"}},
                           {"index":1,"message":{"role":"assistant","content":"second"}}]}"#,
        )
        .expect("parse");
        assert_eq!(response.content(), Some("first"));
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).expect("parse");
        assert_eq!(response.content(), None);
    }

    #[test]
    fn test_response_choice_without_message() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"index":0,"finish_reason":"content_filter"}]}"#)
                .expect("parse");
        assert_eq!(response.content(), None);
    }
}
