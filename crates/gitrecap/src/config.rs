//! Configuration for the gitrecap command line
//!
//! This module provides the CLI definition, validation of the paths it names,
//! and the settings handed to the summarization client and logger.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gitrecap_llm::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_MODEL, LlmSettings};

use crate::summarize::DEFAULT_MAX_DIFF_BYTES;
use crate::window::parse_date;

/// gitrecap - daily commit reports with AI-written summaries
#[derive(Parser, Debug, Clone)]
#[command(name = "gitrecap")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to generating reports)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the git repository
    ///
    /// Must contain a `.git` directory. Prompted for when omitted.
    #[arg(short, long, env = "GITRECAP_REPO")]
    pub repo: Option<PathBuf>,

    /// First day of the window (YYYY-MM-DD); prompted for when omitted
    #[arg(short, long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD); prompted for when omitted
    #[arg(short, long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Only include commits whose author name contains this text
    #[arg(short, long)]
    pub author: Option<String>,

    /// Directory for the report files
    ///
    /// Defaults to the repository path.
    #[arg(short, long, env = "GITRECAP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Model used for summaries
    #[arg(short, long, env = "GITRECAP_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "GITRECAP_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// API key sent as a bearer token
    #[arg(long, env = "GITRECAP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Language the summaries are written in
    #[arg(short, long, env = "GITRECAP_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Largest change set, in bytes, sent for one commit
    #[arg(long, default_value_t = DEFAULT_MAX_DIFF_BYTES)]
    pub max_diff_bytes: usize,

    /// Timeout for one summarization request, in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout only carries progress lines.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write one Markdown report per day of the window (default)
    Report,

    /// Summarize a single commit and print the result
    ///
    /// Example:
    ///   gitrecap --repo . show 1945ab9
    Show {
        /// Commit hash, abbreviated (7+) or full
        hash: String,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: None,
            repo: None,
            start: None,
            end: None,
            author: None,
            output_dir: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
            timeout_secs: 120,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Get the output directory for `repo`, defaulting to the repository itself
    #[must_use]
    pub fn output_dir_for(&self, repo: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| repo.to_path_buf())
    }

    /// Build the summarization client settings
    #[must_use]
    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            base_url: self.api_base.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is given but is not a git working tree
    /// - The output directory is given but is not an existing directory
    /// - The `show` hash is not 7 to 40 hex characters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            validate_repo(repo)?;
        }

        if let Some(ref dir) = self.output_dir
            && !dir.is_dir()
        {
            return Err(ConfigError::OutputNotDirectory(dir.clone()));
        }

        if let Some(Command::Show { ref hash }) = self.command
            && !is_hash_input(hash)
        {
            return Err(ConfigError::InvalidHash(hash.clone()));
        }

        if self.max_diff_bytes == 0 {
            return Err(ConfigError::ZeroDiffBudget);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Check that `path` is a directory holding a `.git` directory
///
/// # Errors
///
/// Returns the matching `ConfigError` for a missing path, a non-directory or
/// a directory without git metadata.
pub fn validate_repo(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::RepoNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConfigError::RepoNotDirectory(path.to_path_buf()));
    }
    if !path.join(".git").is_dir() {
        return Err(ConfigError::NotAGitRepo(path.to_path_buf()));
    }
    Ok(())
}

/// Whether `input` looks like an abbreviated or full commit hash
#[must_use]
pub fn is_hash_input(input: &str) -> bool {
    (7..=40).contains(&input.len()) && input.chars().all(|c| c.is_ascii_hexdigit())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// Directory has no `.git` directory
    #[error("Not a git repository (no .git directory): {0}")]
    NotAGitRepo(PathBuf),

    /// Output path is missing or not a directory
    #[error("Output path is not a directory: {0}")]
    OutputNotDirectory(PathBuf),

    /// Hash argument is malformed
    #[error("Invalid commit hash '{0}': expected 7 to 40 hex characters")]
    InvalidHash(String),

    /// Diff budget of zero would send no change set at all
    #[error("--max-diff-bytes must be greater than zero")]
    ZeroDiffBudget,
}
