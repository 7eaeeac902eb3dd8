//! # Configuration System
//!
//! Hierarchical TOML configuration for the overview cache.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.overview-cache/config.toml` (global user preferences)
//! 3. **Project config** - `./.overview-cache/config.toml` (project-specific overrides)
//! 4. **Environment** - `OVERVIEW_API_URL` (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.overview-cache/config.toml
//! [api]
//! base_url = "https://dashboard.example.com"
//! overview_path = "/api/dashboard/overview"
//! timeout_secs = 10
//!
//! [cache]
//! ttl_secs = 300
//! auto_refresh_interval_secs = 300
//!
//! [auth]
//! login_path = "/login"
//! redirect_delay_ms = 100
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use overview_cache::config::OverviewConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OverviewConfig::load_hierarchy()?;
//!     println!("{}", config.api.endpoint_url());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use types::{ApiConfig, AuthConfig, CacheConfig, OverviewConfig};
pub use validation::validate_config;

impl OverviewConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
