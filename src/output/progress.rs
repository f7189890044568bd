//! In-place console progress for page fetching

use crate::analysis::ProgressSink;
use std::io::Write;

/// Rewrites a single stdout line with `current/total` while fetching
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_fetch(&self, current: usize, total: usize) {
        let mut stdout = std::io::stdout().lock();
        // progress output is best effort
        let _ = write!(stdout, "\r📖 Fetching pages: {}/{}", current, total);
        let _ = stdout.flush();
    }

    fn on_complete(&self, total: usize) {
        // trailing spaces clear what is left of the longer in-progress line
        println!("\r📖 Fetched pages: {}/{}     ", total, total);
    }
}
