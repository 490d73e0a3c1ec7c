use chrono::{DateTime, Duration};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gitrecap::group::group_by_day;
use gitrecap::report::assemble;
use gitrecap::summarize::{DEFAULT_MAX_DIFF_BYTES, SummaryResult, build_prompt};
use gitrecap_git::CommitRecord;

/// Commits spread over `days` days, newest first
fn sample_commits(count: usize, days: usize) -> Vec<CommitRecord> {
    let base =
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").expect("valid timestamp");
    let step_minutes = (days * 24 * 60 / count.max(1)) as i64;

    (0..count)
        .rev()
        .map(|i| CommitRecord {
            hash: format!("{:040x}", i),
            timestamp: base + Duration::minutes(i as i64 * step_minutes),
            message: format!("Commit message {i}\n\nRefactor module {}.", i % 7),
            author: format!("Author {}", i % 10),
            author_email: format!("author{}@example.com", i % 10),
            parents: vec![],
        })
        .collect()
}

fn grouping_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");

    for count in [100, 1000, 5000] {
        let commits = sample_commits(count, 60);
        group.bench_with_input(
            BenchmarkId::new("group_by_day", count),
            &commits,
            |b, commits| b.iter(|| group_by_day(commits)),
        );
    }

    group.finish();
}

fn assembly_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for per_day in [5, 50] {
        let commits = sample_commits(per_day, 1);
        let buckets = group_by_day(&commits);
        let bucket = buckets.values().next().expect("one bucket");
        assert_eq!(bucket.commits.len(), per_day, "sample commits must share one day");
        let results: Vec<SummaryResult> = bucket
            .commits
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i % 5 == 0 {
                    SummaryResult::Failed("Server returned error: 503 - unavailable".to_string())
                } else {
                    SummaryResult::Summarized(format!("This commit {}.", c.subject()))
                }
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("assemble", per_day),
            &results,
            |b, results| b.iter(|| assemble(bucket, results)),
        );
    }

    // Prompt building with and without truncation
    let small = "+line\n".repeat(100);
    let large = "+line\n".repeat(50_000);
    group.bench_function("build_prompt_small", |b| {
        b.iter(|| build_prompt(&small, DEFAULT_MAX_DIFF_BYTES))
    });
    group.bench_function("build_prompt_truncated", |b| {
        b.iter(|| build_prompt(&large, DEFAULT_MAX_DIFF_BYTES))
    });

    group.finish();
}

criterion_group!(benches, grouping_benchmarks, assembly_benchmarks);
criterion_main!(benches);
