//! Markdown assembly for one day of commits

use std::fmt::Write;

use crate::group::DayBucket;
use crate::summarize::SummaryResult;

/// Marker appended to the heading of a commit whose summary failed
pub const ERROR_MARKER: &str = "(error occurred)";

/// Message rendered when a commit has no matching result
const MISSING_RESULT: &str = "No summary was produced for this commit.";

/// One rendered day report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Markdown body
    pub body: String,
}

/// Render `bucket` with its index-aligned `results`
///
/// Pure and infallible: failed summaries are rendered under an
/// [`ERROR_MARKER`] heading instead of being raised.
#[must_use]
pub fn assemble(bucket: &DayBucket, results: &[SummaryResult]) -> ReportDocument {
    let mut body = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(body, "# Commit report: {}", bucket.date);
    let _ = writeln!(body);
    let _ = writeln!(body, "Commits: {}", bucket.commits.len());

    for (idx, commit) in bucket.commits.iter().enumerate() {
        let _ = writeln!(body);
        let _ = writeln!(
            body,
            "## {}. {} {}",
            idx + 1,
            commit.short_hash(),
            commit.subject()
        );
        let _ = writeln!(body);
        let _ = writeln!(
            body,
            "*{} <{}>, {}*",
            commit.author,
            commit.author_email,
            commit.timestamp.to_rfc3339()
        );
        let _ = writeln!(body);

        match results.get(idx) {
            Some(SummaryResult::Summarized(text)) => {
                let _ = writeln!(body, "{}", text.trim_end());
            }
            Some(SummaryResult::Failed(message)) => {
                let _ = writeln!(body, "### {ERROR_MARKER}");
                let _ = writeln!(body);
                let _ = writeln!(body, "{}", message.trim_end());
            }
            None => {
                let _ = writeln!(body, "### {ERROR_MARKER}");
                let _ = writeln!(body);
                let _ = writeln!(body, "{MISSING_RESULT}");
            }
        }

        let _ = writeln!(body);
        let _ = writeln!(body, "---");
    }

    ReportDocument {
        date: bucket.date.clone(),
        body,
    }
}
