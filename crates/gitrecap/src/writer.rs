//! Persisting day reports

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::report::ReportDocument;

/// Failure writing one report
#[derive(Debug, Error)]
#[error("Failed to write {}: {source}", .path.display())]
pub struct WriteError {
    /// Target file
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

/// File name used for the report of `date`
#[must_use]
pub fn report_file_name(date: &str) -> String {
    format!("commit-report-{date}.md")
}

/// Write `doc` into `dir`, replacing any earlier report for the same date
///
/// # Errors
///
/// Returns `WriteError` if the file cannot be written; the directory is not
/// created on demand.
pub fn write_report(doc: &ReportDocument, dir: &Path) -> Result<PathBuf, WriteError> {
    let path = dir.join(report_file_name(&doc.date));
    std::fs::write(&path, &doc.body).map_err(|source| WriteError {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = doc.body.len(), "Wrote report");
    Ok(path)
}
