// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Batch report generation
//!
//! [`ReportGenerator`] validates the window, lists the commits once, groups
//! them by day and then handles one day at a time: every commit is
//! summarized in turn, the day's report is assembled and written.
//!
//! Only window validation and the initial listing can abort a run. Failed
//! summaries are rendered into their report and failed writes are reported
//! for their date while the remaining dates carry on.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use gitrecap::pipeline::{ReportGenerator, ReportOptions};
//! use gitrecap::window::parse_date;
//! use gitrecap_git::GitRepo;
//! use gitrecap_llm::{ChatClient, LlmSettings};
//!
//! let repo = GitRepo::open(".")?;
//! let client = ChatClient::new(LlmSettings::default());
//! let generator = ReportGenerator::new(repo, client, ReportOptions::new("."));
//!
//! let summary = generator
//!     .run(parse_date("2024-01-01")?, parse_date("2024-01-31")?, None)
//!     .await?;
//! println!("Wrote {} reports", summary.reports.len());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gitrecap_git::GitError;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::group::{DayBucket, group_by_day};
use crate::report::assemble;
use crate::summarize::{CommitSummarizer, DEFAULT_MAX_DIFF_BYTES, Summarizer};
use crate::vcs::CommitSource;
use crate::window::{DateWindow, WindowError};
use crate::writer::write_report;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum RunError {
    /// The requested window was rejected
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Commits could not be listed
    #[error("Failed to list commits: {0}")]
    Fetch(#[source] GitError),
}

// ============================================================================
// Progress Reporting
// ============================================================================

/// Progress callback signature
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Progress event during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The window passed validation
    WindowAccepted {
        /// First day of the window
        start: NaiveDate,
        /// Last day of the window
        end: NaiveDate,
        /// Author filter, if any
        author: Option<String>,
    },
    /// The window contains no commits; nothing will be written
    NoCommits,
    /// Commits were listed and grouped
    CommitsFetched {
        /// Number of commits in the window
        commits: usize,
        /// Number of distinct dates
        days: usize,
    },
    /// A commit is about to be summarized
    CommitStarted {
        /// Date being processed
        date: String,
        /// 1-based position inside the day
        position: usize,
        /// Commits on that day
        total: usize,
        /// Abbreviated hash
        short_hash: String,
        /// Commit subject line
        subject: String,
    },
    /// A commit's summary failed and was recorded in the report
    CommitFailed {
        /// Date being processed
        date: String,
        /// Abbreviated hash
        short_hash: String,
        /// Error message
        message: String,
    },
    /// A day's report was written
    DayWritten {
        /// Report date
        date: String,
        /// Written file
        path: PathBuf,
    },
    /// A day's report could not be written
    DayWriteFailed {
        /// Report date
        date: String,
        /// Error message
        message: String,
    },
}

impl ProgressEvent {
    /// Whether the event describes a failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::CommitFailed { .. } | Self::DayWriteFailed { .. }
        )
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowAccepted { start, end, author } => {
                write!(f, "Collecting commits from {start} to {end}")?;
                if let Some(author) = author {
                    write!(f, " by authors matching '{author}'")?;
                }
                Ok(())
            }
            Self::NoCommits => write!(f, "No commits found in the requested window."),
            Self::CommitsFetched { commits, days } => {
                write!(f, "Found {commits} commit(s) across {days} day(s)")
            }
            Self::CommitStarted {
                date,
                position,
                total,
                short_hash,
                subject,
            } => write!(f, "[{date}] ({position}/{total}) {short_hash} {subject}"),
            Self::CommitFailed {
                date,
                short_hash,
                message,
            } => write!(f, "[{date}] {short_hash} could not be summarized: {message}"),
            Self::DayWritten { date, path } => {
                write!(f, "[{date}] Report written to {}", path.display())
            }
            Self::DayWriteFailed { date, message } => {
                write!(f, "[{date}] Report could not be written: {message}")
            }
        }
    }
}

// ============================================================================
// Options and Statistics
// ============================================================================

/// Options for a report run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Directory the reports are written into
    pub output_dir: PathBuf,
    /// Cap on the change-set text sent per commit
    pub max_diff_bytes: usize,
}

impl ReportOptions {
    /// Write reports into `output_dir` with default limits
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
        }
    }

    /// Cap the change-set text sent per commit
    #[must_use]
    pub fn with_max_diff_bytes(mut self, max: usize) -> Self {
        self.max_diff_bytes = max;
        self
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commits found in the window
    pub commits: usize,
    /// Commits with a summary
    pub summarized: usize,
    /// Commits whose summary failed
    pub failed: usize,
    /// Reports written, in processing order
    pub reports: Vec<PathBuf>,
    /// Dates whose report could not be written
    pub write_failures: Vec<String>,
}

impl RunSummary {
    /// Whether the window held no commits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits == 0
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Turns a date window into per-day report files
pub struct ReportGenerator<V, S> {
    vcs: V,
    summarizer: S,
    options: ReportOptions,
    progress: Option<ProgressCallback>,
}

impl<V, S> ReportGenerator<V, S>
where
    V: CommitSource,
    S: Summarizer,
{
    /// Create a generator over the given collaborators
    #[must_use]
    pub fn new(vcs: V, summarizer: S, options: ReportOptions) -> Self {
        Self {
            vcs,
            summarizer,
            options,
            progress: None,
        }
    }

    /// Set a progress callback
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Report progress event
    fn report(&self, event: ProgressEvent) {
        if let Some(ref callback) = self.progress {
            callback(&event);
        }
    }

    /// Generate the reports for `start..=end`
    ///
    /// # Errors
    ///
    /// Returns `RunError::Window` if the dates are rejected and
    /// `RunError::Fetch` if the commits cannot be listed. Nothing is written
    /// in either case.
    pub async fn run(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        author: Option<String>,
    ) -> Result<RunSummary, RunError> {
        let window = DateWindow::new(start, end, author)?;
        self.report(ProgressEvent::WindowAccepted {
            start: window.start(),
            end: window.end(),
            author: window.author().map(str::to_string),
        });

        let commits = self.vcs.list_commits(&window).map_err(RunError::Fetch)?;
        if commits.is_empty() {
            info!(start = %window.start(), end = %window.end(), "No commits in window");
            self.report(ProgressEvent::NoCommits);
            return Ok(RunSummary::default());
        }

        let buckets = group_by_day(&commits);
        info!(commits = commits.len(), days = buckets.len(), "Grouped commits");
        self.report(ProgressEvent::CommitsFetched {
            commits: commits.len(),
            days: buckets.len(),
        });

        let mut summary = RunSummary {
            commits: commits.len(),
            ..Default::default()
        };
        for bucket in buckets.values() {
            self.process_day(bucket, &mut summary).await;
        }

        info!(
            reports = summary.reports.len(),
            failed_commits = summary.failed,
            failed_writes = summary.write_failures.len(),
            "Report generation complete"
        );
        Ok(summary)
    }

    /// Summarize, assemble and write one day
    async fn process_day(&self, bucket: &DayBucket, summary: &mut RunSummary) {
        let summarizer = CommitSummarizer::new(&self.vcs, &self.summarizer)
            .with_max_diff_bytes(self.options.max_diff_bytes);
        let total = bucket.commits.len();

        let mut results = Vec::with_capacity(total);
        for (idx, commit) in bucket.commits.iter().enumerate() {
            self.report(ProgressEvent::CommitStarted {
                date: bucket.date.clone(),
                position: idx + 1,
                total,
                short_hash: commit.short_hash().to_string(),
                subject: commit.subject().to_string(),
            });

            debug!(hash = %commit.hash, merge = commit.is_merge(), "Processing commit");
            let result = summarizer.summarize(&commit.hash).await;
            if result.is_ok() {
                summary.summarized += 1;
            } else {
                summary.failed += 1;
                self.report(ProgressEvent::CommitFailed {
                    date: bucket.date.clone(),
                    short_hash: commit.short_hash().to_string(),
                    message: result.text().to_string(),
                });
            }
            results.push(result);
        }

        let doc = assemble(bucket, &results);
        match write_report(&doc, self.output_dir()) {
            Ok(path) => {
                info!(date = %bucket.date, path = %path.display(), "Report written");
                self.report(ProgressEvent::DayWritten {
                    date: bucket.date.clone(),
                    path: path.clone(),
                });
                summary.reports.push(path);
            }
            Err(e) => {
                error!(date = %bucket.date, error = %e, "Failed to write report");
                self.report(ProgressEvent::DayWriteFailed {
                    date: bucket.date.clone(),
                    message: e.to_string(),
                });
                summary.write_failures.push(bucket.date.clone());
            }
        }
    }

    /// Directory the reports are written into
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.options.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_display() {
        let event = ProgressEvent::WindowAccepted {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            author: Some("Ada".to_string()),
        };
        assert_eq!(
            event.to_string(),
            "Collecting commits from 2024-01-01 to 2024-01-02 by authors matching 'Ada'"
        );

        let event = ProgressEvent::CommitStarted {
            date: "2024-01-01".to_string(),
            position: 2,
            total: 3,
            short_hash: "abc1234".to_string(),
            subject: "Fix bug".to_string(),
        };
        assert_eq!(event.to_string(), "[2024-01-01] (2/3) abc1234 Fix bug");
        assert!(!event.is_failure());
    }

    #[test]
    fn test_failure_events() {
        assert!(
            ProgressEvent::DayWriteFailed {
                date: "2024-01-01".to_string(),
                message: "denied".to_string(),
            }
            .is_failure()
        );
        assert!(!ProgressEvent::NoCommits.is_failure());
        assert_eq!(
            ProgressEvent::NoCommits.to_string(),
            "No commits found in the requested window."
        );
    }

    #[test]
    fn test_report_options_builder() {
        let options = ReportOptions::new("/tmp/out").with_max_diff_bytes(10);
        assert_eq!(options.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(options.max_diff_bytes, 10);
    }
}
