//! Run statistics
//!
//! Derived once from the fetch outcomes and the comment tally after every
//! fetch has completed.

use crate::analysis::{CommentTally, FetchOutcome};

/// Summary numbers for a ranking run
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Number of links fetched (successful or not)
    pub total_pages: usize,

    /// Pages fetched and decoded
    pub success_pages: usize,

    /// Pages that could not be fetched
    pub failed_pages: usize,

    /// Marker occurrences across all successful pages
    pub total_comments: u64,

    /// Distinct commenters
    pub unique_commenters: usize,

    /// `success_pages / total_pages` in percent, one decimal; 0 without pages
    pub success_rate: f64,
}

impl Statistics {
    /// Computes statistics from the outcomes and their tally
    pub fn calculate(outcomes: &[FetchOutcome], tally: &CommentTally) -> Self {
        let success_pages = outcomes.iter().filter(|o| o.is_success()).count();
        let failed_pages = outcomes.len() - success_pages;
        let total_pages = success_pages + failed_pages;

        Self {
            total_pages,
            success_pages,
            failed_pages,
            total_comments: tally.total(),
            unique_commenters: tally.len(),
            success_rate: percentage(success_pages, total_pages),
        }
    }
}

/// `part / whole` in percent rounded to one decimal; 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

/// Rounds half away from zero to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
