//! Grouping commits by calendar day

use gitrecap_git::CommitRecord;
use indexmap::IndexMap;

/// Commits sharing one UTC calendar date, in history order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Commits of that date, newest first as listed
    pub commits: Vec<CommitRecord>,
}

/// Day buckets keyed by date, in the order each date was first seen
pub type DayBuckets = IndexMap<String, DayBucket>;

/// Partition `commits` by the UTC date of their timestamp
///
/// Buckets appear in first-seen order and commits keep their input order
/// inside each bucket. With the usual newest-first listing that yields
/// buckets in descending date order, but callers must not rely on it.
#[must_use]
pub fn group_by_day(commits: &[CommitRecord]) -> DayBuckets {
    let mut buckets = DayBuckets::new();
    for commit in commits {
        let date = commit.utc_date();
        buckets
            .entry(date.clone())
            .or_insert_with(|| DayBucket {
                date,
                commits: Vec::new(),
            })
            .commits
            .push(commit.clone());
    }
    buckets
}
