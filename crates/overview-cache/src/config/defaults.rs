//! Built-in configuration values and the accessors that apply them.

use crate::config::types::{ApiConfig, AuthConfig, CacheConfig};
use chrono::TimeDelta;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_OVERVIEW_PATH: &str = "/api/dashboard/overview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Snapshots older than five minutes are refetched on the next lazy fetch.
pub const DEFAULT_TTL_SECS: u64 = 300;
pub const DEFAULT_AUTO_REFRESH_INTERVAL_SECS: u64 = 300;

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 100;

/// Environment variable that overrides `[api] base_url`.
pub const API_URL_ENV: &str = "OVERVIEW_API_URL";

impl ApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn overview_path(&self) -> &str {
        self.overview_path.as_deref().unwrap_or(DEFAULT_OVERVIEW_PATH)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Full URL of the overview resource.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url().trim_end_matches('/'),
            self.overview_path()
        )
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> TimeDelta {
        let secs = self.ttl_secs.unwrap_or(DEFAULT_TTL_SECS);
        i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn auto_refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.auto_refresh_interval_secs
                .unwrap_or(DEFAULT_AUTO_REFRESH_INTERVAL_SECS),
        )
    }
}

impl AuthConfig {
    pub fn login_path(&self) -> &str {
        self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS))
    }
}
