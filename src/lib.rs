//! cosense-ranker: comment leaderboards for Cosense hub pages
//!
//! This crate fetches a "hub" page, follows every page it links to, counts the
//! `[username.icon]` markers found in those pages and renders a ranking. It can
//! alternatively break down a single user's comments per page, or check that each
//! linked page resolves to real content.

pub mod analysis;
pub mod config;
pub mod output;
pub mod store;

use thiserror::Error;

/// Main error type for cosense-ranker operations
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No page specified (expected --page PROJECT/PAGE)")]
    MissingPageFlag,

    #[error("Invalid page format: '{spec}' (expected PROJECT/PAGE, e.g. yasulab/README)")]
    InvalidPageSpec { spec: String },

    #[error("The response for {page} has no links field; the page may not support link aggregation")]
    MissingLinksField { page: String },

    #[error("Failed to fetch {page}: {failure}")]
    HubFetch {
        page: String,
        failure: store::PageFailure,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for cosense-ranker operations
pub type Result<T> = std::result::Result<T, RankerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analysis::{Analyzer, Mode, RunOutcome};
pub use config::{Config, RunContext, RunOptions};
pub use store::{CosenseClient, PageData, PageResponse, PageStore};
