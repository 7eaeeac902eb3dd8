//! Configuration type definitions for the overview cache.
//!
//! These types are serialized/deserialized from TOML config files. Every
//! field is optional so that merging a partial project config never clobbers
//! a value the user config set; accessors in [`super::defaults`] fill in the
//! built-in values.
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//!
//! [cache]
//! ttl_secs = 120
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.overview-cache/config.toml`
/// 2. Project config: `./.overview-cache/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OverviewConfig {
    /// Remote overview endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Staleness and auto-refresh settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Login redirect behavior on authentication failure
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the dashboard API, without trailing slash.
    /// Default: `http://localhost:3000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Path of the overview resource.
    /// Default: `/api/dashboard/overview`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview_path: Option<String>,

    /// Request timeout in seconds.
    /// Default: 10 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Cache freshness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheConfig {
    /// Age in seconds after which a cached snapshot is stale.
    /// Default: 300 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,

    /// Interval in seconds between auto-refresh ticks.
    /// Default: 300 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_refresh_interval_secs: Option<u64>,
}

/// Authentication failure handling.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthConfig {
    /// Path of the login surface to redirect to.
    /// Default: `/login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_path: Option<String>,

    /// Delay before the login redirect fires, in milliseconds.
    /// Default: 100ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_delay_ms: Option<u64>,
}
