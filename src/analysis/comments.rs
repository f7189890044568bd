//! Commenter markers, tallying and ranking
//!
//! A comment is signed with an icon marker such as `[yasulab.icon]`. Every
//! marker counts as one comment by that user.

use crate::analysis::orchestrator::FetchOutcome;
use crate::store::LineRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// `[<username>.icon]`, where the username contains no brackets
const ICON_PATTERN: &str = r"\[([^\[\]]+)\.icon\]";

fn icon_regex() -> &'static Regex {
    static ICON: OnceLock<Regex> = OnceLock::new();
    ICON.get_or_init(|| Regex::new(ICON_PATTERN).expect("icon pattern is a valid regex"))
}

/// Builds a regex matching exactly `[<username>.icon]`
pub fn user_icon_regex(username: &str) -> Regex {
    let pattern = format!(r"\[{}\.icon\]", regex::escape(username));
    // an escaped literal always compiles
    Regex::new(&pattern).expect("escaped username is a valid regex")
}

/// Extracts every marker occurrence from a page, line by line, left to right
pub fn extract_commenters(lines: &[LineRecord]) -> Vec<String> {
    let icon = icon_regex();
    lines
        .iter()
        .flat_map(|line| icon.captures_iter(&line.text))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub rank: usize,
    pub username: String,
    pub count: u64,
}

/// Comment counts per user, remembering the order users were first seen
#[derive(Debug, Clone, Default)]
pub struct CommentTally {
    /// `(username, count)` in discovery order
    entries: Vec<(String, u64)>,
    /// username -> position in `entries` (its discovery index)
    index: HashMap<String, usize>,
}

impl CommentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `username`
    pub fn record(&mut self, username: &str) {
        match self.index.get(username) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(username.to_string(), self.entries.len());
                self.entries.push((username.to_string(), 1));
            }
        }
    }

    /// Tallies the commenters of every successful outcome, in outcome order
    pub fn from_outcomes(outcomes: &[FetchOutcome]) -> Self {
        let mut tally = Self::new();
        for commenters in outcomes.iter().filter_map(FetchOutcome::commenters) {
            for username in commenters {
                tally.record(username);
            }
        }
        tally
    }

    pub fn count(&self, username: &str) -> u64 {
        self.index
            .get(username)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Number of distinct users
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// `(username, count)` pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Dense ranking by count descending; equal counts keep discovery order
    pub fn ranking(&self) -> Vec<RankingEntry> {
        // entries are already in discovery order and the sort is stable
        let mut sorted: Vec<&(String, u64)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, (username, count))| RankingEntry {
                rank: i + 1,
                username: username.clone(),
                count: *count,
            })
            .collect()
    }
}
