// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitrecap-llm: chat-completion client for commit summaries
//!
//! This crate talks to any OpenAI-compatible `/chat/completions` endpoint and
//! turns a single prompt into generated text.

#![warn(missing_docs)]

mod client;
mod models;

pub use client::{ChatClient, LlmSettings};
pub use models::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature sent with every summary request
pub const SUMMARY_TEMPERATURE: f32 = 0.25;

/// Language the summaries are written in when none is configured
pub const DEFAULT_LANGUAGE: &str = "English";

/// Build the persona sent as the system message of every request
#[must_use]
pub fn system_instruction(language: &str) -> String {
    format!("Respond concisely, in {language}, avoiding unnecessary embellishment.")
}

/// Error types for summarization requests
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Server returned error: {status} - {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The service answered but produced no text
    #[error("The summarization service returned no text")]
    EmptyResponse,
}

/// Result type for summarization requests
pub type Result<T> = std::result::Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_names_language() {
        let persona = system_instruction("Korean");
        assert!(persona.contains("in Korean"));
        assert!(persona.starts_with("Respond concisely"));
    }

    #[test]
    fn test_error_messages() {
        let err = LlmError::Server {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned error: 429 - rate limited");
        assert_eq!(
            LlmError::EmptyResponse.to_string(),
            "The summarization service returned no text"
        );
    }
}
