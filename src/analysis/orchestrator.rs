//! Sequential, rate-limited page fetching
//!
//! Links are fetched one at a time, in order, with a fixed pause between
//! requests. A failed fetch is recorded as a [`FetchOutcome::Failure`] and the
//! loop moves on; nothing here aborts a run.

use crate::analysis::comments::extract_commenters;
use crate::analysis::links::Link;
use crate::store::{PageData, PageFailure, PageResponse, PageStore};
use std::time::Duration;

/// Result of fetching one link
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The page was fetched; `commenters` holds its marker occurrences
    Success {
        link: Link,
        page: PageData,
        commenters: Vec<String>,
    },

    /// The page could not be fetched or decoded
    Failure { link: Link, reason: PageFailure },
}

impl FetchOutcome {
    pub fn link(&self) -> &Link {
        match self {
            FetchOutcome::Success { link, .. } | FetchOutcome::Failure { link, .. } => link,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    pub fn page(&self) -> Option<&PageData> {
        match self {
            FetchOutcome::Success { page, .. } => Some(page),
            FetchOutcome::Failure { .. } => None,
        }
    }

    pub fn commenters(&self) -> Option<&[String]> {
        match self {
            FetchOutcome::Success { commenters, .. } => Some(commenters),
            FetchOutcome::Failure { .. } => None,
        }
    }
}

/// Receives fetch progress; not part of any result
pub trait ProgressSink {
    /// Called before fetching link `current` (1-based) of `total`
    fn on_fetch(&self, current: usize, total: usize);

    /// Called once after the last fetch
    fn on_complete(&self, total: usize);
}

/// Progress sink that ignores everything
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_fetch(&self, _current: usize, _total: usize) {}
    fn on_complete(&self, _total: usize) {}
}

/// Enforces a fixed pause between consecutive requests
///
/// The first call to [`RequestPacer::wait`] returns immediately; every later
/// call sleeps the full `delay`. Callers wait only after the previous request
/// has completed, so the pause always separates the end of one request from
/// the start of the next, however long a fetch takes.
#[derive(Debug)]
pub struct RequestPacer {
    delay: Duration,
    requests: usize,
}

impl RequestPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, requests: 0 }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of requests let through so far
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Waits until the next request may be sent
    pub async fn wait(&mut self) {
        if self.requests > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.requests += 1;
    }
}

/// Fetches the page a link points to
///
/// This is the single-fetch primitive shared by comment aggregation and link
/// checking.
pub async fn fetch_link<S: PageStore + ?Sized>(
    store: &S,
    hub_project: &str,
    link: &Link,
) -> PageResponse {
    let project = link.target_project(hub_project);
    store.fetch(project, &link.page_name()).await
}

/// Limits the links to the first one when `first_only` is set
pub fn select_links(links: &[Link], first_only: bool) -> &[Link] {
    if first_only {
        &links[..links.len().min(1)]
    } else {
        links
    }
}

/// Fetches every link in order and extracts its commenters
///
/// # Arguments
///
/// * `store` - Page source
/// * `hub_project` - Project used for links without one
/// * `links` - Links to fetch, already filtered
/// * `first_only` - Fetch only the first link
/// * `pacer` - Pause enforced between requests
/// * `progress` - Receives `index/total` updates
///
/// # Returns
///
/// One outcome per fetched link, in link order
pub async fn fetch_all<S: PageStore + ?Sized>(
    store: &S,
    hub_project: &str,
    links: &[Link],
    first_only: bool,
    pacer: &mut RequestPacer,
    progress: &dyn ProgressSink,
) -> Vec<FetchOutcome> {
    let targets = select_links(links, first_only);
    let total = targets.len();
    let mut outcomes = Vec::with_capacity(total);

    for (idx, link) in targets.iter().enumerate() {
        progress.on_fetch(idx + 1, total);
        pacer.wait().await;

        let response = fetch_link(store, hub_project, link).await;
        let outcome = match response.into_result(store.is_authenticated()) {
            Ok(page) => {
                let commenters = extract_commenters(&page.lines);
                tracing::debug!(
                    "Fetched {} ({} lines, {} markers)",
                    link.name,
                    page.lines.len(),
                    commenters.len()
                );
                FetchOutcome::Success {
                    link: link.clone(),
                    page,
                    commenters,
                }
            }
            Err(reason) => {
                tracing::debug!("Skipping {}: {}", link.name, reason);
                FetchOutcome::Failure {
                    link: link.clone(),
                    reason,
                }
            }
        };
        outcomes.push(outcome);
    }

    progress.on_complete(total);
    outcomes
}
