//! Ranking report generation
//!
//! The report is printed to the console and saved to a plain-text file. Both
//! variants share the ranking block, which is delimited by
//! [`RANKING_MARKER`] and a [`SEPARATOR_LINE`] so the converter can find it.

use crate::analysis::{CommentTally, FetchOutcome, RankingEntry};
use crate::output::stats::Statistics;
use crate::output::{SEPARATOR_LINE, SUB_SEPARATOR};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Heading line that opens the ranking block
pub const RANKING_MARKER: &str = "🏆 Commenter Ranking:";

/// Display width usernames are padded to
pub const NAME_WIDTH: usize = 20;

/// Width of a full bar
pub const BAR_WIDTH: usize = 30;

/// Failed pages listed by name before the rest are summarized
pub const MAX_FAILED_LISTED: usize = 5;

/// Everything the ranking report shows
#[derive(Debug, Clone)]
pub struct RankingReport {
    pub stats: Statistics,
    pub entries: Vec<RankingEntry>,
    /// Names of the links that could not be fetched, in link order
    pub failed_pages: Vec<String>,
}

impl RankingReport {
    /// Tallies the outcomes and builds the report data
    pub fn build(outcomes: &[FetchOutcome]) -> Self {
        let tally = CommentTally::from_outcomes(outcomes);
        Self {
            stats: Statistics::calculate(outcomes, &tally),
            entries: tally.ranking(),
            failed_pages: outcomes
                .iter()
                .filter(|o| !o.is_success())
                .map(|o| o.link().name.clone())
                .collect(),
        }
    }

    /// Report as printed to the console
    pub fn render_console(&self) -> String {
        self.render_lines(true).join("\n") + "\n"
    }

    /// Report as saved to disk
    ///
    /// The file variant starts with a short header and leaves out the failed
    /// page count line; the ranking block is identical. `config_hash` is the
    /// SHA-256 of the config file the run used, if any.
    pub fn render_file(&self, hub: &str, generated_at: &str, config_hash: Option<&str>) -> String {
        let mut lines = vec![
            "# cosense-ranker report".to_string(),
            format!("# Hub page: {}", hub),
            format!("# Generated: {}", generated_at),
            format!("# Config: {}", config_hash.unwrap_or("defaults")),
        ];
        lines.extend(self.render_lines(false));
        lines.join("\n") + "\n"
    }

    fn render_lines(&self, show_failed_count: bool) -> Vec<String> {
        let stats = &self.stats;
        let mut lines = vec![
            SEPARATOR_LINE.to_string(),
            "📊 Comment aggregation results".to_string(),
            SEPARATOR_LINE.to_string(),
            format!(
                "📄 Pages analyzed: {}/{} ({:.1}% success)",
                stats.success_pages, stats.total_pages, stats.success_rate
            ),
            format!("💬 Total comments: {}", stats.total_comments),
            format!("👥 Commenters: {}", stats.unique_commenters),
        ];
        if show_failed_count && stats.failed_pages > 0 {
            lines.push(format!("⚠️ Failed pages: {}", stats.failed_pages));
        }
        lines.push(SUB_SEPARATOR.to_string());

        match self.entries.first() {
            None => lines.push("No comments found".to_string()),
            Some(top) => {
                lines.push(RANKING_MARKER.to_string());
                lines.push(String::new());
                let max_count = top.count;
                lines.extend(
                    self.entries
                        .iter()
                        .map(|e| format_ranking_line(e.rank, &e.username, e.count, max_count)),
                );
            }
        }

        if !self.failed_pages.is_empty() {
            lines.push(SUB_SEPARATOR.to_string());
            lines.push("📝 Pages that could not be fetched:".to_string());
            for name in self.failed_pages.iter().take(MAX_FAILED_LISTED) {
                lines.push(format!("\t- {}", name));
            }
            if self.failed_pages.len() > MAX_FAILED_LISTED {
                lines.push(format!(
                    "\t... and {} more pages",
                    self.failed_pages.len() - MAX_FAILED_LISTED
                ));
            }
        }

        lines.push(SEPARATOR_LINE.to_string());
        lines
    }
}

/// Terminal width of `text`: ASCII counts 1, everything else 2
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

/// Pads `text` with spaces up to `width` display columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(padding))
}

/// A bar of `round(value / max * width)` blocks; empty when `max` is 0
pub fn bar_graph(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let length = (value as f64 / max as f64 * width as f64).round() as usize;
    "█".repeat(length)
}

/// One leaderboard line, e.g. ` 1. yasulab             :  30 ████`
pub fn format_ranking_line(rank: usize, username: &str, count: u64, max_count: u64) -> String {
    format!(
        "{:>2}. {}: {:>3} {}",
        rank,
        pad_to_width(username, NAME_WIDTH),
        count,
        bar_graph(count, max_count, BAR_WIDTH)
    )
}

/// Writes the report, replacing any previous file
pub fn write_report(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
