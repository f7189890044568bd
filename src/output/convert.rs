//! Saved report to Cosense table conversion
//!
//! Reads the ranking block back out of a saved report and writes it as a
//! Cosense `table:` block that can be pasted into a page.

use crate::output::ranking::RANKING_MARKER;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Title of the generated table
pub const TABLE_TITLE: &str = "comment-ranking";

/// Table lines shown in the converter preview
pub const PREVIEW_LINES: usize = 12;

/// Errors raised while converting a report
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("ranking section not found")]
    MissingSection,

    #[error("no ranking entries found")]
    NoEntries,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub comments: u64,
}

fn section_regex() -> &'static Regex {
    static SECTION: OnceLock<Regex> = OnceLock::new();
    SECTION.get_or_init(|| {
        let pattern = format!(r"(?s){}(.+?)={{10,}}", regex::escape(RANKING_MARKER));
        Regex::new(&pattern).expect("section pattern is a valid regex")
    })
}

fn row_regex() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| {
        // greedy name: the count is the last `: N` before the bar, so names may hold colons
        Regex::new(r"^\s*(\d+)\.\s+(.+)\s*:\s*(\d+)\s*█*\s*$").expect("row pattern is a valid regex")
    })
}

/// Extracts the leaderboard rows from a report's text
///
/// Returns [`ConvertError::MissingSection`] when no ranking block is present.
/// A block without parsable rows yields an empty list.
pub fn parse_ranking(content: &str) -> Result<Vec<RankingRow>, ConvertError> {
    let section = section_regex()
        .captures(content)
        .ok_or(ConvertError::MissingSection)?;

    let rows = section[1]
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| row_regex().captures(line))
        .filter_map(|caps| {
            Some(RankingRow {
                rank: caps[1].parse().ok()?,
                name: caps[2].trim().to_string(),
                comments: caps[3].parse().ok()?,
            })
        })
        .collect();

    Ok(rows)
}

/// Renders rows as a Cosense table (no trailing newline)
pub fn to_table(rows: &[RankingRow]) -> String {
    let mut lines = vec![
        format!("table:{}", TABLE_TITLE),
        "rank\tname\tcomments".to_string(),
    ];
    lines.extend(
        rows.iter()
            .map(|row| format!("{}\t{}\t{}", row.rank, row.name, row.comments)),
    );
    lines.join("\n")
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    pub rows: Vec<RankingRow>,
    pub table: String,
}

impl Conversion {
    /// The first [`PREVIEW_LINES`] table lines and how many lines follow them
    pub fn preview(&self) -> (Vec<&str>, usize) {
        let lines: Vec<&str> = self.table.lines().collect();
        let remaining = lines.len().saturating_sub(PREVIEW_LINES);
        (lines.into_iter().take(PREVIEW_LINES).collect(), remaining)
    }
}

/// Converts the report at `input` and writes the table to `output`
///
/// Nothing is written unless at least one row was parsed.
pub fn convert_file(input: &Path, output: &Path) -> Result<Conversion, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }

    let content = std::fs::read_to_string(input)?;
    let rows = parse_ranking(&content)?;
    if rows.is_empty() {
        return Err(ConvertError::NoEntries);
    }

    let table = to_table(&rows);
    std::fs::write(output, &table)?;
    tracing::debug!("Wrote {} rows to {}", rows.len(), output.display());

    Ok(Conversion { rows, table })
}
