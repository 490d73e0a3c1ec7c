// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitrecap-git: git history access for gitrecap
//!
//! This library crate lists the commits of a repository inside a time window
//! and renders a single commit as `git show`-style text (message, stat and
//! patch) for consumption by the gitrecap report generator.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitrecap_git::{GitRepo, LogQuery};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let commits = repo.list_commits(&LogQuery::default()).expect("list commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_hash(), c.subject());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::CommitRecord;
pub use error::GitError;
pub use repo::{GitRepo, LogQuery};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitRecord;
    pub use crate::error::GitError;
    pub use crate::repo::{GitRepo, LogQuery};
}
