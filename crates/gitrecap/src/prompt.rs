//! Interactive collection of missing operator input
//!
//! Values given on the command line are used as-is; anything missing is asked
//! for on the terminal, re-asking until the answer is well formed.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::{Config, validate_repo};
use crate::window::parse_date;

/// Errors while prompting
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before a value was given
    #[error("Input closed before {0} was provided")]
    Closed(&'static str),

    /// Terminal I/O failed
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything needed to start a report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInput {
    /// Repository path
    pub repo: PathBuf,
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window
    pub end: NaiveDate,
    /// Optional author filter
    pub author: Option<String>,
}

/// Fill in whatever `config` leaves out by asking on `input`/`output`
///
/// The author filter is only asked for when no other value was missing, so a
/// fully scripted invocation never blocks on the terminal.
///
/// # Errors
///
/// Returns `PromptError` if the input ends or cannot be read.
pub fn collect<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<OperatorInput, PromptError> {
    let interactive = config.repo.is_none() || config.start.is_none() || config.end.is_none();

    let repo = match config.repo {
        Some(ref repo) => repo.clone(),
        None => ask_repo(input, output)?,
    };
    let start = match config.start {
        Some(start) => start,
        None => ask_date(input, output, "Start date (YYYY-MM-DD)", "the start date")?,
    };
    let end = match config.end {
        Some(end) => end,
        None => ask_date(input, output, "End date (YYYY-MM-DD)", "the end date")?,
    };
    let author = match config.author {
        Some(ref author) => Some(author.clone()),
        None if interactive => {
            let answer = ask(input, output, "Author filter (leave empty for all)")?;
            Some(answer).filter(|a| !a.is_empty())
        }
        None => None,
    };

    Ok(OperatorInput {
        repo,
        start,
        end,
        author,
    })
}

/// Ask for a repository path until one with a `.git` directory is given
///
/// # Errors
///
/// Returns `PromptError` if the input ends or cannot be read.
pub fn ask_repo<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, PromptError> {
    loop {
        let answer = ask(input, output, "Repository path")?;
        if answer.is_empty() {
            continue;
        }
        let path = PathBuf::from(answer);
        match validate_repo(&path) {
            Ok(()) => return Ok(path),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

fn ask_date<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    what: &'static str,
) -> Result<NaiveDate, PromptError> {
    loop {
        let answer = ask(input, output, label).map_err(|e| match e {
            PromptError::Closed(_) => PromptError::Closed(what),
            other => other,
        })?;
        match parse_date(&answer) {
            Ok(date) => return Ok(date),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

/// Print `label`, read one line and return it trimmed
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, PromptError> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Closed("a value"));
    }
    Ok(line.trim().to_string())
}
