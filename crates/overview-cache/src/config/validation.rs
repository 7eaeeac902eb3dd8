//! Configuration validation logic.

use crate::config::types::OverviewConfig;
use crate::errors::ConfigError;

/// Validate an OverviewConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Base URL must be non-empty and use `http://` or `https://`
/// - Overview path and login path must start with `/`
/// - Timeout, TTL and auto-refresh interval must be greater than zero
pub fn validate_config(config: &OverviewConfig) -> Result<(), ConfigError> {
    let base_url = config.api.base_url().trim();
    if base_url.is_empty() {
        return invalid("api.base_url cannot be empty".to_string());
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return invalid(format!(
            "api.base_url '{}' must start with http:// or https://",
            base_url
        ));
    }

    if !config.api.overview_path().starts_with('/') {
        return invalid(format!(
            "api.overview_path '{}' must start with '/'",
            config.api.overview_path()
        ));
    }

    if config.api.timeout_secs == Some(0) {
        return invalid("api.timeout_secs must be greater than 0".to_string());
    }

    if config.cache.ttl_secs == Some(0) {
        return invalid("cache.ttl_secs must be greater than 0".to_string());
    }

    if config.cache.auto_refresh_interval_secs == Some(0) {
        return invalid("cache.auto_refresh_interval_secs must be greater than 0".to_string());
    }

    if !config.auth.login_path().starts_with('/') {
        return invalid(format!(
            "auth.login_path '{}' must start with '/'",
            config.auth.login_path()
        ));
    }

    Ok(())
}

fn invalid(message: String) -> Result<(), ConfigError> {
    Err(ConfigError::InvalidConfiguration { message })
}
