// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access
//!
//! This module lists commits inside a time window and renders one commit as
//! text using the `git2` crate.

use crate::commit::CommitRecord;
use crate::error::GitError;
use chrono::{DateTime, FixedOffset, Utc};
use git2::{DiffFormat, DiffOptions, DiffStatsFormat, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Width used when rendering the per-file stat block
const STAT_WIDTH: usize = 80;

/// Filter for listing commits
///
/// Bounds apply to the committer time, both ends inclusive, the way
/// `git log --since/--until` compares them.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    /// Only include commits committed at or after this instant
    pub since: Option<DateTime<Utc>>,
    /// Only include commits committed at or before this instant
    pub until: Option<DateTime<Utc>>,
    /// Only include commits whose author name contains this substring
    pub author: Option<String>,
}

impl LogQuery {
    /// Filter commits since an instant
    #[must_use]
    pub fn since(mut self, instant: DateTime<Utc>) -> Self {
        self.since = Some(instant);
        self
    }

    /// Filter commits until an instant
    #[must_use]
    pub fn until(mut self, instant: DateTime<Utc>) -> Self {
        self.until = Some(instant);
        self
    }

    /// Restrict to authors whose name contains `author`
    #[must_use]
    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    fn matches(&self, committed: DateTime<Utc>, author: &str) -> bool {
        if self.since.is_some_and(|since| committed < since) {
            return false;
        }
        if self.until.is_some_and(|until| committed > until) {
            return false;
        }
        match self.author {
            Some(ref filter) => author.contains(filter.as_str()),
            None => true,
        }
    }
}

/// A git repository wrapper for listing and showing commits
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// List the commits reachable from HEAD that match `query`
    ///
    /// Commits come back newest first, in the order the history walk yields
    /// them. An empty list is returned when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved or the history cannot be walked.
    pub fn list_commits(&self, query: &LogQuery) -> Result<Vec<CommitRecord>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let git_commit = self.repo.find_commit(oid?)?;

            let committed = DateTime::from_timestamp(git_commit.committer().when().seconds(), 0)
                .ok_or_else(|| GitError::InvalidTimestamp {
                    sha: git_commit.id().to_string(),
                })?;
            let author = git_commit.author().name().unwrap_or("Unknown").to_string();

            if !query.matches(committed, &author) {
                continue;
            }

            commits.push(self.extract_commit(&git_commit)?);
        }

        debug!(count = commits.len(), "Listed commits");
        Ok(commits)
    }

    /// Extract commit metadata from a git2 commit
    fn extract_commit(&self, git_commit: &git2::Commit<'_>) -> Result<CommitRecord, GitError> {
        let hash = git_commit.id().to_string();
        let signature = git_commit.author();
        let timestamp = to_datetime(signature.when()).ok_or_else(|| GitError::InvalidTimestamp {
            sha: hash.clone(),
        })?;

        Ok(CommitRecord {
            timestamp,
            message: String::from_utf8_lossy(git_commit.message_bytes()).into_owned(),
            author: signature.name().unwrap_or("Unknown").to_string(),
            author_email: signature.email().unwrap_or("").to_string(),
            parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
            hash,
        })
    }

    /// Render a commit as its message, a per-file stat block and the full patch
    ///
    /// The layout follows `git show --format=%B --stat --patch`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if `reference` does not name a commit.
    pub fn show_commit(&self, reference: &str) -> Result<String, GitError> {
        let git_commit = self
            .repo
            .revparse_single(reference)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::InvalidReference {
                reference: reference.to_string(),
            })?;

        let tree = git_commit.tree()?;
        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.context_lines(3);
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let mut text = String::new();
        text.push_str(String::from_utf8_lossy(git_commit.message_bytes()).trim_end());
        text.push_str("\n---\n");

        let stats = diff.stats()?.to_buf(DiffStatsFormat::FULL, STAT_WIDTH)?;
        text.push_str(&String::from_utf8_lossy(&stats));
        text.push('\n');

        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let content = String::from_utf8_lossy(line.content());
            match line.origin() {
                origin @ ('+' | '-' | ' ') => {
                    text.push(origin);
                    text.push_str(&content);
                }
                _ => text.push_str(&content),
            }
            true
        })?;

        Ok(text)
    }
}

/// Convert a git2 time into a timestamp carrying the recorded offset
fn to_datetime(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}
