//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.overview-cache/config.toml`
//! 3. **Project config** - `./.overview-cache/config.toml`
//! 4. **Environment** - `OVERVIEW_API_URL`

use crate::config::defaults::API_URL_ENV;
use crate::config::types::{ApiConfig, AuthConfig, CacheConfig, OverviewConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used for both the user and project config locations.
pub const CONFIG_DIR_NAME: &str = ".overview-cache";

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors. Parse errors and validation failures are.
pub fn load_hierarchy() -> Result<OverviewConfig, ConfigError> {
    let mut config = OverviewConfig::default();

    if let Some(path) = user_config_path() {
        config = merge_optional(config, &path)?;
    }

    let project_path = std::env::current_dir()?
        .join(CONFIG_DIR_NAME)
        .join("config.toml");
    config = merge_optional(config, &project_path)?;

    let config = apply_env_overrides(config, std::env::var(API_URL_ENV).ok());

    validate_config(&config)?;

    Ok(config)
}

/// Path of the user-level config file, if a home directory can be found.
fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Merge the config at `path` over `base`, skipping files that do not exist.
fn merge_optional(base: OverviewConfig, path: &Path) -> Result<OverviewConfig, ConfigError> {
    match load_config_file(path) {
        Ok(file_config) => Ok(merge_configs(base, file_config)),
        Err(ConfigError::ConfigNotFound { path }) => {
            debug!(event = "cache.config.file_missing", path = %path);
            Ok(base)
        }
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<OverviewConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Every field is optional, so an unset override value keeps the base value.
pub fn merge_configs(base: OverviewConfig, override_config: OverviewConfig) -> OverviewConfig {
    OverviewConfig {
        api: ApiConfig {
            base_url: override_config.api.base_url.or(base.api.base_url),
            overview_path: override_config.api.overview_path.or(base.api.overview_path),
            timeout_secs: override_config.api.timeout_secs.or(base.api.timeout_secs),
        },
        cache: CacheConfig {
            ttl_secs: override_config.cache.ttl_secs.or(base.cache.ttl_secs),
            auto_refresh_interval_secs: override_config
                .cache
                .auto_refresh_interval_secs
                .or(base.cache.auto_refresh_interval_secs),
        },
        auth: AuthConfig {
            login_path: override_config.auth.login_path.or(base.auth.login_path),
            redirect_delay_ms: override_config
                .auth
                .redirect_delay_ms
                .or(base.auth.redirect_delay_ms),
        },
    }
}

/// Apply environment overrides on top of file configuration.
///
/// Takes the already-read value so callers and tests do not touch process env.
pub fn apply_env_overrides(mut config: OverviewConfig, api_url: Option<String>) -> OverviewConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = Some(url);
    }
    config
}
