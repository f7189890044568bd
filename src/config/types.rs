use serde::Deserialize;
use std::time::Duration;

/// Default Cosense API endpoint
pub const DEFAULT_BASE_URL: &str = "https://scrapbox.io/api";

/// Main configuration structure for cosense-ranker
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default, rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the page API (without trailing slash)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Delays between consecutive requests to the page API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Delay between page fetches while aggregating comments (milliseconds)
    #[serde(rename = "fetch-delay-ms")]
    pub fetch_delay_ms: u64,

    /// Delay between page fetches while checking links (milliseconds)
    #[serde(rename = "check-delay-ms")]
    pub check_delay_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 200,
            check_delay_ms: 100,
        }
    }
}

impl RateLimitConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn check_delay(&self) -> Duration {
        Duration::from_millis(self.check_delay_ms)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the ranking report, overwritten on every ranking run
    #[serde(rename = "report-path")]
    pub report_path: String,

    /// Path of the table produced by the converter
    #[serde(rename = "table-path")]
    pub table_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "result.txt".to_string(),
            table_path: "cosense.txt".to_string(),
        }
    }
}
