//! Configuration module for cosense-ranker
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, reading the session credential from the environment and
//! building the immutable [`RunContext`] that is handed to every component.
//!
//! # Example
//!
//! ```no_run
//! use cosense_ranker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ranker.toml")).unwrap();
//! println!("Delay between fetches: {}ms", config.rate_limit.fetch_delay_ms);
//! ```

mod context;
mod env;
mod parser;
mod types;
mod validation;

// Re-export types
pub use context::{PageSpec, RunContext, RunOptions};
pub use env::{load_session_id, SESSION_ENV_VAR};
pub use types::{ApiConfig, Config, OutputConfig, RateLimitConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
