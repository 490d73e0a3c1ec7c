//! Commit records as listed from the repository

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A commit as reported by the repository history walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The full commit hash (40 hex characters)
    pub hash: String,
    /// Author timestamp, keeping the offset recorded in the commit
    pub timestamp: DateTime<FixedOffset>,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Parent commit hashes
    pub parents: Vec<String>,
}

impl CommitRecord {
    /// Get the abbreviated hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(idx, _)| idx);
        &self.hash[..end]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// The commit's calendar date in UTC, formatted `YYYY-MM-DD`
    #[must_use]
    pub fn utc_date(&self) -> String {
        self.timestamp
            .with_timezone(&Utc)
            .format("%Y-%m-%d")
            .to_string()
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
