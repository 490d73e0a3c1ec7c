//! Version-control collaborator
//!
//! The report generator only needs two things from the repository: the
//! commits inside a window and the `show` text of one commit. [`CommitSource`]
//! is that seam; [`GitRepo`] implements it for real repositories.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use gitrecap_git::{CommitRecord, GitError, GitRepo, LogQuery};

use crate::window::DateWindow;

/// Source of commit history
pub trait CommitSource {
    /// List the commits inside `window`, newest first
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be read.
    fn list_commits(&self, window: &DateWindow) -> Result<Vec<CommitRecord>, GitError>;

    /// Render one commit as message, stat block and patch
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `hash` does not name a commit.
    fn show_commit(&self, hash: &str) -> Result<String, GitError>;
}

impl CommitSource for GitRepo {
    fn list_commits(&self, window: &DateWindow) -> Result<Vec<CommitRecord>, GitError> {
        GitRepo::list_commits(self, &log_query(window))
    }

    fn show_commit(&self, hash: &str) -> Result<String, GitError> {
        GitRepo::show_commit(self, hash)
    }
}

/// Translate a window into history-walk bounds
///
/// Dates are read the way `git log --since=<start> --until=<end>` reads bare
/// dates: midnight local time on each day, both bounds inclusive. Commits
/// made on the end date after midnight fall outside the window.
#[must_use]
pub fn log_query(window: &DateWindow) -> LogQuery {
    let mut query = LogQuery::default()
        .since(local_midnight(window.start()))
        .until(local_midnight(window.end()));
    if let Some(author) = window.author() {
        query = query.author(author);
    }
    query
}

/// Midnight of `date` in the local time zone, as a UTC instant
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // DST can skip local midnight; fall back to UTC midnight then
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
}
