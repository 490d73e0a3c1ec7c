// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end report generation against real repositories
//!
//! Commits sit around noon UTC so the local-midnight window bounds never
//! move them in or out, whatever time zone the tests run in.


use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use git2::{Oid, Repository, Signature, Time};
use gitrecap::pipeline::{ReportGenerator, ReportOptions};
use gitrecap::report::ERROR_MARKER;
use gitrecap::summarize::INSTRUCTION;
use gitrecap_git::GitRepo;
use tempfile::TempDir;

use fixtures::{FAIL_MARKER, FakeSummarizer};

/// 2024-01-01T12:00:00Z
const JAN_1_NOON: i64 = 1_704_110_400;
const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn commit_file(
    repo: &Repository,
    name: &str,
    content: &str,
    message: &str,
    author: &str,
    secs: i64,
) -> Oid {
    let workdir = repo.workdir().expect("non-bare repo");
    std::fs::write(workdir.join(name), content).expect("write file");

    let mut index = repo.index().expect("open index");
    index.add_path(Path::new(name)).expect("stage file");
    index.write().expect("write index");
    let tree = repo.find_tree(index.write_tree().expect("write tree")).expect("find tree");

    let sig = Signature::new(author, "dev@example.com", &Time::new(secs, 0)).expect("signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("create commit")
}

/// Jan 1: two commits (Ada, Grace); Jan 2: one commit (Ada)
fn sample_repo() -> (TempDir, Vec<Oid>) {
    let dir = TempDir::new().expect("create temp dir");
    let repo = Repository::init(dir.path()).expect("init repo");
    let oids = vec![
        commit_file(&repo, "a.txt", "one\n", "Add a.txt", "Ada Lovelace", JAN_1_NOON - HOUR),
        commit_file(&repo, "b.txt", "two\n", "Add b.txt", "Grace Hopper", JAN_1_NOON + HOUR),
        commit_file(
            &repo,
            "a.txt",
            "one\nthree\n",
            "Extend a.txt",
            "Ada Lovelace",
            JAN_1_NOON + DAY,
        ),
    ];
    (dir, oids)
}

#[tokio::test]
async fn test_reports_from_real_history() {
    let (repo_dir, oids) = sample_repo();
    let out = TempDir::new().unwrap();
    let summarizer = FakeSummarizer::default();
    let prompts = Arc::clone(&summarizer.prompts);

    let repo = GitRepo::open(repo_dir.path()).expect("open repo");
    let summary = ReportGenerator::new(repo, summarizer, ReportOptions::new(out.path()))
        .run(date("2023-12-31"), date("2024-01-04"), None)
        .await
        .expect("run");

    assert_eq!(summary.commits, 3);
    assert_eq!(summary.summarized, 3);
    assert_eq!(
        summary.reports,
        vec![
            out.path().join("commit-report-2024-01-02.md"),
            out.path().join("commit-report-2024-01-01.md"),
        ]
    );

    let jan_1 = std::fs::read_to_string(out.path().join("commit-report-2024-01-01.md")).unwrap();
    assert!(jan_1.contains("Commits: 2"));
    assert!(jan_1.contains(&format!("## 1. {} Add b.txt", &oids[1].to_string()[..7])));
    assert!(jan_1.contains(&format!("## 2. {} Add a.txt", &oids[0].to_string()[..7])));
    assert!(jan_1.contains("Summary of 'Add b.txt'."));

    // The change set carries the stat block and the patch
    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 3);
    let first = &prompts[0];
    assert!(first.starts_with(INSTRUCTION));
    assert!(first.contains("Extend a.txt"));
    assert!(first.contains("a.txt | 1 +"));
    assert!(first.contains("+three"));
}

#[tokio::test]
async fn test_author_filter_limits_reports() {
    let (repo_dir, _) = sample_repo();
    let out = TempDir::new().unwrap();

    let repo = GitRepo::open(repo_dir.path()).expect("open repo");
    let options = ReportOptions::new(out.path());
    let summary = ReportGenerator::new(repo, FakeSummarizer::default(), options)
        .run(date("2023-12-31"), date("2024-01-04"), Some("Grace".to_string()))
        .await
        .expect("run");

    assert_eq!(summary.commits, 1);
    assert_eq!(summary.reports, vec![out.path().join("commit-report-2024-01-01.md")]);
    let body = std::fs::read_to_string(&summary.reports[0]).unwrap();
    assert!(body.contains("Add b.txt"));
    assert!(!body.contains("Add a.txt"));
}

#[tokio::test]
async fn test_window_before_history_writes_nothing() {
    let (repo_dir, _) = sample_repo();
    let out = TempDir::new().unwrap();

    let repo = GitRepo::open(repo_dir.path()).expect("open repo");
    let options = ReportOptions::new(out.path());
    let summary = ReportGenerator::new(repo, FakeSummarizer::default(), options)
        .run(date("2023-06-01"), date("2023-06-30"), None)
        .await
        .expect("run");

    assert!(summary.is_empty());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_failed_summary_is_rendered_in_report() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let message = format!("Rework loader {FAIL_MARKER}\n\nSplit parsing from IO.");
    commit_file(&repo, "loader.rs", "fn load() {}\n", &message, "Ada Lovelace", JAN_1_NOON);
    let out = TempDir::new().unwrap();

    let summary = ReportGenerator::new(
        GitRepo::open(dir.path()).unwrap(),
        FakeSummarizer::default(),
        ReportOptions::new(out.path()),
    )
    .run(date("2023-12-31"), date("2024-01-04"), None)
    .await
    .expect("run");

    assert_eq!(summary.failed, 1);
    let body = std::fs::read_to_string(out.path().join("commit-report-2024-01-01.md")).unwrap();
    assert!(body.contains(&format!("### {ERROR_MARKER}")));
    assert!(body.contains("Server returned error: 503 - service unavailable"));
    assert!(body.contains("Rework loader"));
}
