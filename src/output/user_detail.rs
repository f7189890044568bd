//! Per-user comment breakdown
//!
//! Lists, for every successfully fetched page, how often one user's marker
//! appears and on which lines.

use crate::analysis::comments::user_icon_regex;
use crate::analysis::FetchOutcome;
use crate::output::{truncate_chars, SEPARATOR_LINE, SUB_SEPARATOR};
use std::fmt::Write;

/// Longest page title shown before truncation
pub const MAX_TITLE_CHARS: usize = 40;

/// Longest line preview shown before truncation
pub const MAX_PREVIEW_CHARS: usize = 60;

/// A line containing the user's marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLine {
    /// 1-based line number within the page
    pub line_number: usize,
    pub preview: String,
    /// Marker occurrences on this line
    pub count: usize,
}

/// The user's markers on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBreakdown {
    /// 1-based position of the page in the fetched link list
    pub position: usize,
    pub title: String,
    pub total: usize,
    pub lines: Vec<UserLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBreakdown {
    pub username: String,
    pub pages: Vec<PageBreakdown>,
    pub total: usize,
}

impl UserBreakdown {
    /// Scans every successful outcome for `username`'s marker
    ///
    /// Failed outcomes are skipped but still advance the position counter, so
    /// page numbers match the order links were fetched in.
    pub fn build(username: &str, outcomes: &[FetchOutcome]) -> Self {
        let marker = user_icon_regex(username);
        let mut pages = Vec::new();

        for (idx, outcome) in outcomes.iter().enumerate() {
            let Some(page) = outcome.page() else {
                continue;
            };

            let lines: Vec<UserLine> = page
                .lines
                .iter()
                .enumerate()
                .filter_map(|(i, line)| {
                    let count = marker.find_iter(&line.text).count();
                    (count > 0).then(|| UserLine {
                        line_number: i + 1,
                        preview: truncate_chars(&line.text, MAX_PREVIEW_CHARS),
                        count,
                    })
                })
                .collect();

            pages.push(PageBreakdown {
                position: idx + 1,
                title: truncate_chars(&page.title.replace('+', " "), MAX_TITLE_CHARS),
                total: lines.iter().map(|l| l.count).sum(),
                lines,
            });
        }

        let total = pages.iter().map(|p| p.total).sum();
        Self {
            username: username.to_string(),
            pages,
            total,
        }
    }

    pub fn render(&self) -> String {
        let mut s = String::new();
        // writing to a String cannot fail
        let _ = self.render_into(&mut s);
        s
    }

    fn render_into(&self, s: &mut String) -> std::fmt::Result {
        writeln!(s, "{}", SEPARATOR_LINE)?;
        writeln!(s, "🔍 Per-user detail: {}", self.username)?;
        writeln!(s, "{}", SEPARATOR_LINE)?;

        for page in &self.pages {
            writeln!(s, "{:>2}. {}", page.position, page.title)?;
            writeln!(s, "\t{}: {}", self.username, page.total)?;
            if !page.lines.is_empty() {
                writeln!(s, "\tDetails:")?;
                for line in &page.lines {
                    writeln!(s, "\t\tL{}: {}", line.line_number, line.preview)?;
                    if line.count > 1 {
                        writeln!(s, "\t\t\t({} occurrences)", line.count)?;
                    }
                }
            }
            writeln!(s)?;
        }

        writeln!(s, "{}", SUB_SEPARATOR)?;
        writeln!(
            s,
            "📊 Total: comments by {} = {}",
            self.username, self.total
        )?;
        writeln!(s, "{}", SEPARATOR_LINE)
    }
}
