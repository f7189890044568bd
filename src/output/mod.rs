//! Output module for reports and summaries
//!
//! This module handles:
//! - Computing run statistics
//! - Rendering the ranking report (console and persisted variants)
//! - Rendering the per-user detail report
//! - Converting a saved report into a Cosense table
//! - Console progress display

pub mod convert;
pub mod progress;
pub mod ranking;
pub mod stats;
pub mod user_detail;

pub use convert::{convert_file, parse_ranking, to_table, Conversion, ConvertError, RankingRow};
pub use progress::ConsoleProgress;
pub use ranking::{write_report, RankingReport};
pub use stats::Statistics;
pub use user_detail::UserBreakdown;

/// Width of the report separators
pub const SEPARATOR_WIDTH: usize = 60;

/// Top, bottom and section-closing separator
pub const SEPARATOR_LINE: &str = "============================================================";

/// Separator between blocks inside a report
pub const SUB_SEPARATOR: &str = "------------------------------------------------------------";

/// Shortens `text` to `max` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
