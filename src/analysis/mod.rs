//! Analysis pipeline for hub pages
//!
//! This module contains the core logic, including:
//! - Link extraction and keyword filtering
//! - Sequential, rate-limited fetching of linked pages
//! - Comment marker extraction, tallying and ranking
//! - Link validity checking
//! - The [`Analyzer`] that runs one mode end to end

pub mod comments;
pub mod links;
pub mod orchestrator;
pub mod validity;

pub use comments::{extract_commenters, CommentTally, RankingEntry};
pub use links::{extract_links, filter_links, Link, LinkKind};
pub use orchestrator::{fetch_all, fetch_link, FetchOutcome, NoProgress, ProgressSink, RequestPacer};
pub use validity::{check_links, LinkStatus, ValidityReport};

use crate::config::{Config, RunContext, RunOptions};
use crate::output::ranking::{write_report, RankingReport};
use crate::output::user_detail::UserBreakdown;
use crate::store::PageStore;
use crate::RankerError;
use std::io::Write;
use std::path::Path;

/// What a run produces; exactly one mode runs per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Comment leaderboard (default)
    Ranking,
    /// Per-page breakdown for one user
    UserDetail(String),
    /// Link validity check
    CheckLinks,
}

impl Mode {
    /// Picks the mode; `--check-links` wins over `--username`
    pub fn from_options(options: &RunOptions) -> Self {
        if options.check_links {
            Mode::CheckLinks
        } else if let Some(username) = &options.username {
            Mode::UserDetail(username.clone())
        } else {
            Mode::Ranking
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The hub page has no links; nothing was fetched
    NoLinks,
    Ranking(RankingReport),
    UserDetail(UserBreakdown),
    LinkCheck(ValidityReport),
}

/// Runs the pipeline for one hub page
pub struct Analyzer<'a, S: PageStore + ?Sized> {
    store: &'a S,
    config: &'a Config,
    context: &'a RunContext,
    config_hash: Option<&'a str>,
    progress: &'a dyn ProgressSink,
}

impl<'a, S: PageStore + ?Sized> Analyzer<'a, S> {
    pub fn new(store: &'a S, config: &'a Config, context: &'a RunContext) -> Self {
        Self {
            store,
            config,
            context,
            config_hash: None,
            progress: &NoProgress,
        }
    }

    /// Records the config file hash in the saved report header
    pub fn with_config_hash(mut self, hash: Option<&'a str>) -> Self {
        self.config_hash = hash;
        self
    }

    /// Reports fetch progress to `progress`
    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    /// Fetches the hub page and returns its raw link titles
    ///
    /// # Returns
    ///
    /// * `Err(RankerError::HubFetch)` - The hub page could not be fetched
    /// * `Err(RankerError::MissingLinksField)` - The payload has no links field
    pub async fn load_hub_links(&self) -> Result<Vec<String>, RankerError> {
        let hub = &self.context.hub;
        tracing::info!("Fetching hub page {}", hub);

        let page = self
            .store
            .fetch(&hub.project, &hub.page)
            .await
            .into_result(self.store.is_authenticated())
            .map_err(|failure| RankerError::HubFetch {
                page: hub.to_string(),
                failure,
            })?;

        page.links.ok_or_else(|| RankerError::MissingLinksField {
            page: hub.to_string(),
        })
    }

    /// Runs the selected mode, writing human-readable output to `out`
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunOutcome, RankerError> {
        let project = self.context.project();
        if self.store.is_authenticated() {
            writeln!(out, "🔐 Accessing '{}' in authenticated mode...", project)?;
        } else {
            writeln!(out, "📖 Accessing '{}' in public mode...", project)?;
        }

        let raw_links = self.load_hub_links().await?;
        if raw_links.is_empty() {
            tracing::warn!("Hub page {} has no links", self.context.hub);
            writeln!(out, "⚠️  Warning: this page contains no links")?;
            return Ok(RunOutcome::NoLinks);
        }

        let links = filter_links(
            extract_links(&raw_links),
            self.context.options.keyword.as_deref(),
        );
        tracing::info!(
            "{} of {} links selected for analysis",
            links.len(),
            raw_links.len()
        );

        let rate_limit = &self.config.rate_limit;
        let mode = Mode::from_options(&self.context.options);

        if mode == Mode::CheckLinks {
            let mut pacer = RequestPacer::new(rate_limit.check_delay());
            let report = check_links(self.store, project, &links, &mut pacer, out).await?;
            return Ok(RunOutcome::LinkCheck(report));
        }

        writeln!(out)?;
        writeln!(out, "📊 Running comment aggregation...")?;
        writeln!(out)?;
        out.flush()?;

        let mut pacer = RequestPacer::new(rate_limit.fetch_delay());
        let outcomes = fetch_all(
            self.store,
            project,
            &links,
            self.context.options.first_only,
            &mut pacer,
            self.progress,
        )
        .await;

        match mode {
            Mode::UserDetail(username) => {
                let breakdown = UserBreakdown::build(&username, &outcomes);
                write!(out, "{}", breakdown.render())?;
                Ok(RunOutcome::UserDetail(breakdown))
            }
            _ => {
                let report = RankingReport::build(&outcomes);
                write!(out, "{}", report.render_console())?;

                let report_path = Path::new(&self.config.output.report_path);
                let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %:z");
                write_report(
                    report_path,
                    &report.render_file(
                        &self.context.hub.to_string(),
                        &generated_at.to_string(),
                        self.config_hash,
                    ),
                )?;
                tracing::info!("Report written to {}", report_path.display());
                writeln!(out)?;
                writeln!(out, "💾 Saved results to {}", report_path.display())?;

                Ok(RunOutcome::Ranking(report))
            }
        }
    }
}
