//! gitrecap library
//!
//! This module exports the report generator and its building blocks for use
//! by the binary and by integration tests.

pub mod config;
pub mod group;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod summarize;
pub mod vcs;
pub mod window;
pub mod writer;
