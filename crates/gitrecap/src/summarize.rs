// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-commit summaries
//!
//! [`CommitSummarizer`] fetches one commit's change set, asks the
//! [`Summarizer`] to explain it and folds every failure into a
//! [`SummaryResult::Failed`] so a bad commit never takes its siblings down.

use async_trait::async_trait;
use gitrecap_llm::{ChatClient, LlmError};
use tracing::{debug, warn};

use crate::vcs::CommitSource;

/// Instruction placed in front of every change set
pub const INSTRUCTION: &str =
    "Analyze the following commit message and change set and explain what it does:";

/// Default cap on the change-set text sent for one commit
pub const DEFAULT_MAX_DIFF_BYTES: usize = 60_000;

/// Text-generation collaborator
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate text for `prompt`
    ///
    /// # Errors
    ///
    /// Returns `LlmError` when the service fails or produces no text.
    async fn summarize(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl Summarizer for ChatClient {
    async fn summarize(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt).await
    }
}

/// Outcome of summarizing one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    /// The service explained the commit
    Summarized(String),
    /// Fetching or summarizing failed; carries the error message
    Failed(String),
}

impl SummaryResult {
    /// Whether a summary was produced
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Summarized(_))
    }

    /// Summary text or error message
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Summarized(text) | Self::Failed(text) => text,
        }
    }
}

/// Summarizes commits one at a time with failure isolation
pub struct CommitSummarizer<'a, V: ?Sized, S: ?Sized> {
    vcs: &'a V,
    summarizer: &'a S,
    max_diff_bytes: usize,
}

impl<'a, V, S> CommitSummarizer<'a, V, S>
where
    V: CommitSource + ?Sized,
    S: Summarizer + ?Sized,
{
    /// Create a summarizer over the given collaborators
    #[must_use]
    pub fn new(vcs: &'a V, summarizer: &'a S) -> Self {
        Self {
            vcs,
            summarizer,
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
        }
    }

    /// Cap the change-set text sent per commit
    #[must_use]
    pub fn with_max_diff_bytes(mut self, max: usize) -> Self {
        self.max_diff_bytes = max;
        self
    }

    /// Summarize the commit named by `hash`
    ///
    /// Never fails: lookup and service errors come back as
    /// [`SummaryResult::Failed`].
    pub async fn summarize(&self, hash: &str) -> SummaryResult {
        let change_set = match self.vcs.show_commit(hash) {
            Ok(text) => text,
            Err(e) => {
                warn!(hash = %hash, error = %e, "Failed to read commit");
                return SummaryResult::Failed(e.to_string());
            }
        };

        let prompt = build_prompt(&change_set, self.max_diff_bytes);
        debug!(hash = %hash, prompt_bytes = prompt.len(), "Summarizing commit");

        match self.summarizer.summarize(&prompt).await {
            Ok(text) if !text.trim().is_empty() => SummaryResult::Summarized(text),
            Ok(_) => {
                warn!(hash = %hash, "Summarizer returned no text");
                SummaryResult::Failed(LlmError::EmptyResponse.to_string())
            }
            Err(e) => {
                warn!(hash = %hash, error = %e, "Failed to summarize commit");
                SummaryResult::Failed(e.to_string())
            }
        }
    }
}

/// Put the instruction in front of the change set, truncating oversized ones
#[must_use]
pub fn build_prompt(change_set: &str, max_bytes: usize) -> String {
    let mut prompt =
        String::with_capacity(INSTRUCTION.len() + 2 + change_set.len().min(max_bytes) + 64);
    prompt.push_str(INSTRUCTION);
    prompt.push_str("\n\n");

    if change_set.len() <= max_bytes {
        prompt.push_str(change_set);
    } else {
        let mut end = max_bytes;
        while !change_set.is_char_boundary(end) {
            end -= 1;
        }
        prompt.push_str(&change_set[..end]);
        prompt.push_str(&format!(
            "\n\n[change set truncated: {end} of {} bytes shown]",
            change_set.len()
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_build_prompt_prefixes_instruction() {
        let prompt = build_prompt("Fix typo\n---\n a | 1 +", DEFAULT_MAX_DIFF_BYTES);
        assert_eq!(
            prompt,
            format!("{INSTRUCTION}\n\nFix typo\n---\n a | 1 +")
        );
    }

    #[test]
    fn test_build_prompt_truncates() {
        let change_set = "x".repeat(100);
        let prompt = build_prompt(&change_set, 10);
        assert!(prompt.contains(&format!("\n\n{}\n\n", "x".repeat(10))));
        assert!(prompt.ends_with("[change set truncated: 10 of 100 bytes shown]"));
    }

    #[test]
    fn test_build_prompt_truncates_on_char_boundary() {
        // Each 'é' is two bytes; a cap of 5 must back off to 4
        let change_set = "ééééé";
        let prompt = build_prompt(change_set, 5);
        assert!(prompt.contains("\n\néé\n\n"));
        assert!(prompt.ends_with("[change set truncated: 4 of 10 bytes shown]"));
    }

    #[test]
    fn test_summary_result_accessors() {
        let ok = SummaryResult::Summarized("adds a file".to_string());
        let failed = SummaryResult::Failed("boom".to_string());
        assert!(ok.is_ok());
        assert!(!failed.is_ok());
        assert_eq!(ok.text(), "adds a file");
        assert_eq!(failed.text(), "boom");
    }
}
