// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Date window validation
//!
//! A [`DateWindow`] can only be built through [`DateWindow::new`], which
//! enforces ordering and the two-month span cap.

use chrono::{Months, NaiveDate};
use thiserror::Error;

/// Longest window accepted, in calendar months
pub const MAX_SPAN_MONTHS: u32 = 2;

/// Errors raised while validating operator dates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Input is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        input: String,
    },

    /// Start date falls after end date
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange {
        /// Requested start
        start: NaiveDate,
        /// Requested end
        end: NaiveDate,
    },

    /// End date lies further than two months after start
    #[error("Range too large: {start}..{end} exceeds two months (latest allowed end is {max_end})")]
    RangeTooLarge {
        /// Requested start
        start: NaiveDate,
        /// Requested end
        end: NaiveDate,
        /// Latest end date that would have been accepted
        max_end: NaiveDate,
    },
}

/// A validated, immutable reporting window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
    author: Option<String>,
}

impl DateWindow {
    /// Validate `start..=end` and build the window
    ///
    /// The span cap uses month arithmetic clamped to the end of the month, so
    /// Jan 31 allows up to Mar 31 and Dec 31 allows up to the last day of
    /// February. A blank author filter counts as no filter.
    ///
    /// # Errors
    ///
    /// Returns `WindowError::InvalidRange` when `start > end` and
    /// `WindowError::RangeTooLarge` when `end` is past `start` plus two months.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        author: Option<String>,
    ) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::InvalidRange { start, end });
        }

        if let Some(max_end) = start.checked_add_months(Months::new(MAX_SPAN_MONTHS))
            && end > max_end
        {
            return Err(WindowError::RangeTooLarge {
                start,
                end,
                max_end,
            });
        }

        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Ok(Self { start, end, author })
    }

    /// First day of the window
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Author name substring filter, if any
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

/// Parse an operator-supplied `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `WindowError::InvalidDate` when the input is not exactly four
/// digits, two digits and two digits separated by dashes, or names a day that
/// does not exist.
pub fn parse_date(input: &str) -> Result<NaiveDate, WindowError> {
    let invalid = || WindowError::InvalidDate {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}
