//! Link validity checking
//!
//! A hub link pointing at a misspelled title still resolves: the service
//! returns an empty page with only a title line. This module fetches every
//! linked page and classifies it by how many lines it has.

use crate::analysis::links::Link;
use crate::analysis::orchestrator::{fetch_link, RequestPacer};
use crate::output::stats::percentage;
use crate::output::{SEPARATOR_LINE, SUB_SEPARATOR};
use crate::store::{PageResponse, PageStore};
use std::fmt;
use std::io::Write;

/// Pages with at least this many lines are considered real content
pub const MIN_VALID_LINES: usize = 100;

/// Classification of one linked page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// At least [`MIN_VALID_LINES`] lines
    Ok { lines: usize },
    /// Only the title line; the link most likely has a wrong title
    Empty,
    /// Some content, but less than expected
    Suspicious { lines: usize },
    /// Non-200 status
    HttpError { status_code: u16 },
    /// No usable response at all
    NetworkError,
}

impl LinkStatus {
    /// Classifies a page store response
    pub fn classify(response: &PageResponse) -> Self {
        match response {
            PageResponse::Success(page) => match page.lines.len() {
                n if n >= MIN_VALID_LINES => LinkStatus::Ok { lines: n },
                1 => LinkStatus::Empty,
                n => LinkStatus::Suspicious { lines: n },
            },
            PageResponse::NetworkError { .. } | PageResponse::Malformed { .. } => {
                LinkStatus::NetworkError
            }
            other => LinkStatus::HttpError {
                status_code: other.status_code().unwrap_or_default(),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LinkStatus::Ok { .. })
    }

    /// Status column, e.g. `✅ OK`
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Ok { .. } => "✅ OK",
            LinkStatus::Empty => "⚠️  EMPTY",
            LinkStatus::Suspicious { .. } => "⚠️  SUSPICIOUS",
            LinkStatus::HttpError { .. } | LinkStatus::NetworkError => "❌ ERROR",
        }
    }

    /// Parenthesized detail shown after the label
    pub fn detail(&self) -> String {
        match self {
            LinkStatus::Ok { lines } => format!("({} lines)", lines),
            LinkStatus::Empty => "(title only - wrong URL?)".to_string(),
            LinkStatus::Suspicious { lines } => {
                format!("({} lines - possibly wrong URL)", lines)
            }
            LinkStatus::HttpError { status_code } => format!("({})", status_code),
            LinkStatus::NetworkError => "(network)".to_string(),
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.detail())
    }
}

/// Result of checking one link
#[derive(Debug, Clone)]
pub struct LinkCheck {
    pub page_name: String,
    pub url: String,
    pub status: LinkStatus,
}

/// Result of checking all links
#[derive(Debug, Clone, Default)]
pub struct ValidityReport {
    pub checks: Vec<LinkCheck>,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidityReport {
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    /// Share of valid links in percent, one decimal
    pub fn success_rate(&self) -> f64 {
        percentage(self.valid, self.total())
    }

    fn record(&mut self, check: LinkCheck) {
        if check.status.is_valid() {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
        self.checks.push(check);
    }
}

/// Checks every link, printing each result as soon as it is known
///
/// The whole (filtered) list is checked regardless of first-only mode.
pub async fn check_links<S, W>(
    store: &S,
    hub_project: &str,
    links: &[Link],
    pacer: &mut RequestPacer,
    out: &mut W,
) -> std::io::Result<ValidityReport>
where
    S: PageStore + ?Sized,
    W: Write,
{
    writeln!(out, "{}", SEPARATOR_LINE)?;
    writeln!(out, "🔍 Link validity check")?;
    writeln!(out, "{}", SEPARATOR_LINE)?;
    writeln!(out, "Pages to check: {}", links.len())?;
    writeln!(out)?;

    let mut report = ValidityReport::default();

    for (idx, link) in links.iter().enumerate() {
        let page_name = link.page_name();
        let url = store.page_url(link.target_project(hub_project), &page_name);

        writeln!(out, "{:>2}. Page: {}", idx + 1, page_name)?;
        writeln!(out, "\tURL: {}", url)?;
        out.flush()?;

        pacer.wait().await;
        let response = fetch_link(store, hub_project, link).await;
        let status = LinkStatus::classify(&response);
        tracing::debug!("{} -> {:?}", page_name, status);

        writeln!(out, "\t→ {}", status)?;
        writeln!(out)?;

        report.record(LinkCheck {
            page_name,
            url,
            status,
        });
    }

    writeln!(out)?;
    writeln!(out, "{}", SUB_SEPARATOR)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "  ✅ Valid: {} pages", report.valid)?;
    writeln!(out, "  ❌ Invalid: {} pages", report.invalid)?;
    writeln!(out, "  Success rate: {:.1}%", report.success_rate())?;
    writeln!(out, "{}", SEPARATOR_LINE)?;

    Ok(report)
}
