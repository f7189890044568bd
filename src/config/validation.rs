use crate::config::types::{ApiConfig, Config, OutputConfig, RateLimitConfig};
use crate::ConfigError;
use url::Url;

/// Lowest delay accepted between aggregation fetches (milliseconds)
const MIN_FETCH_DELAY_MS: u64 = 100;

/// Lowest delay accepted between link-check fetches (milliseconds)
const MIN_CHECK_DELAY_MS: u64 = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_rate_limit_config(&config.rate_limit)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// The remote service expects a polite request rate; the floors keep a
/// config file from turning the delay off.
fn validate_rate_limit_config(config: &RateLimitConfig) -> Result<(), ConfigError> {
    if config.fetch_delay_ms < MIN_FETCH_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "fetch-delay-ms must be >= {}ms, got {}ms",
            MIN_FETCH_DELAY_MS, config.fetch_delay_ms
        )));
    }

    if config.check_delay_ms < MIN_CHECK_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "check-delay-ms must be >= {}ms, got {}ms",
            MIN_CHECK_DELAY_MS, config.check_delay_ms
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    if config.table_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "table-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
