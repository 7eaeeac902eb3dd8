//! Fetch coordination for the overview cache.
//!
//! [`OverviewCache`] is the per-session context object. It decides whether a
//! fetch is needed, talks to the transport, classifies failures and keeps
//! [`CacheState`] consistent.
//!
//! # Concurrency
//!
//! The `loading` flag is advisory. Two overlapping `fetch_overview` calls
//! both reach the transport, and whichever completes last wins the final
//! state. Callers that want to avoid overlap check [`OverviewCache::is_loading`]
//! first, as the auto-refresh task does.

use crate::activity::{Activity, derive_activity};
use crate::auth::{
    AuthGuard, CredentialStore, LoggingNavigator, MemoryCredentialStore, Navigator, is_auth_error,
};
use crate::cache::staleness::is_stale;
use crate::cache::store::CacheState;
use crate::config::OverviewConfig;
use crate::context::{Clock, ExecutionContext, SystemClock};
use crate::errors::OverviewCacheError;
use crate::events;
use crate::overview::types::{IntegrationSummary, Overview, Platform, UsagePeriod};
use crate::transport::{HttpTransport, OverviewTransport, TransportError};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Message returned when the server rejected the credentials.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

/// Message used when a failure carries nothing more specific.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch overview data";

/// Result of a fetch attempt. Fetch failures never surface as `Err`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Overview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FetchOutcome {
    fn cached(data: Overview) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn fetched(data: Overview, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Why a fetch attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Authentication required")]
    Auth,

    #[error("Upstream reported failure: {}", .message.as_deref().unwrap_or("no message"))]
    Upstream { message: Option<String> },

    #[error("Overview response did not include data")]
    MissingData,

    #[error(transparent)]
    Transport(TransportError),
}

impl From<TransportError> for FetchError {
    fn from(error: TransportError) -> Self {
        if is_auth_error(&error) {
            FetchError::Auth
        } else {
            FetchError::Transport(error)
        }
    }
}

impl FetchError {
    /// Message for the inline error banner.
    ///
    /// Prefers the server's own message, then the error's description, then
    /// [`FETCH_FALLBACK_MESSAGE`].
    pub fn display_message(&self) -> String {
        let specific = match self {
            FetchError::Auth => Some(AUTH_REQUIRED_MESSAGE.to_string()),
            FetchError::Upstream { message } => {
                message.clone().filter(|m| !m.trim().is_empty())
            }
            FetchError::MissingData => Some(self.to_string()),
            FetchError::Transport(e) => e
                .server_message()
                .map(str::to_string)
                .or_else(|| Some(e.to_string()).filter(|m| !m.trim().is_empty())),
        };
        specific.unwrap_or_else(|| FETCH_FALLBACK_MESSAGE.to_string())
    }
}

impl OverviewCacheError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::Auth => "FETCH_AUTH_REQUIRED",
            FetchError::Upstream { .. } => "FETCH_UPSTREAM_FAILURE",
            FetchError::MissingData => "FETCH_MISSING_DATA",
            FetchError::Transport(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, FetchError::Auth)
    }
}

/// Resets `loading` when dropped, so it cannot stay set if the fetch future
/// is cancelled or unwinds.
struct LoadingGuard<'a> {
    state: &'a Mutex<CacheState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a Mutex<CacheState>) -> Self {
        lock(state).begin_fetch();
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).end_fetch();
    }
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Overview cache for one logical session.
///
/// Create it once per session with [`OverviewCacheBuilder`] and share the
/// returned `Arc`. Dropping the last reference ends the session.
pub struct OverviewCache {
    state: Mutex<CacheState>,
    transport: Arc<dyn OverviewTransport>,
    auth: AuthGuard,
    clock: Arc<dyn Clock>,
    context: ExecutionContext,
    ttl: TimeDelta,
    auto_refresh_interval: Duration,
}

impl OverviewCache {
    /// Fetch the overview, reusing the cached snapshot while it is fresh.
    ///
    /// With `force_refresh` the staleness check is skipped and the transport
    /// is always called.
    pub async fn fetch_overview(&self, force_refresh: bool) -> FetchOutcome {
        if !force_refresh && let Some(cached) = self.fresh_snapshot() {
            debug!(event = "cache.fetch.skipped_fresh");
            return FetchOutcome::cached(cached);
        }

        let _loading = LoadingGuard::begin(&self.state);
        info!(event = "cache.fetch.started", forced = force_refresh);

        let token = self.auth.resolve_token();
        match self.request(token.as_deref()).await {
            Ok((overview, message)) => {
                let fetched_at = self.clock.now();
                let activity = derive_activity(Some(&overview), fetched_at);
                let activity_count = activity.len();
                self.lock_state()
                    .apply_success(overview.clone(), activity, fetched_at);

                info!(
                    event = "cache.fetch.completed",
                    activity_count = activity_count,
                    fetched_at = %fetched_at
                );
                FetchOutcome::fetched(overview, message)
            }
            Err(FetchError::Auth) => {
                warn!(event = "cache.fetch.auth_required");
                self.auth.handle_auth_failure();
                FetchOutcome::failed(AUTH_REQUIRED_MESSAGE)
            }
            Err(e) => {
                let message = e.display_message();
                warn!(
                    event = "cache.fetch.failed",
                    error = %e,
                    error_code = e.error_code(),
                    message = %message
                );
                if !e.is_user_error() {
                    events::log_error(&e);
                }
                self.lock_state().apply_error(message.clone());
                FetchOutcome::failed(message)
            }
        }
    }

    /// Fetch bypassing the staleness check.
    pub async fn refresh_overview(&self) -> FetchOutcome {
        self.fetch_overview(true).await
    }

    /// Reset all cached state to empty.
    pub fn clear_overview(&self) {
        self.lock_state().clear();
        info!(event = "cache.state.cleared");
    }

    async fn request(&self, token: Option<&str>) -> Result<(Overview, Option<String>), FetchError> {
        let response = self.transport.fetch_overview(token).await?;

        if !response.is_success() {
            return Err(FetchError::Upstream {
                message: response.message,
            });
        }

        match response.data {
            Some(overview) => Ok((overview, response.message)),
            None => Err(FetchError::MissingData),
        }
    }

    /// Cached snapshot if there is one and it is still within the TTL.
    fn fresh_snapshot(&self) -> Option<Overview> {
        let state = self.lock_state();
        let snapshot = state.snapshot()?;
        if is_stale(state.last_fetched_at(), self.clock.now(), self.ttl) {
            return None;
        }
        Some(snapshot.clone())
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        lock(&self.state)
    }

    /// Copy of the full cache state.
    pub fn state(&self) -> CacheState {
        self.lock_state().clone()
    }

    pub fn snapshot(&self) -> Option<Overview> {
        self.lock_state().snapshot().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.lock_state().error().map(str::to_string)
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.lock_state().last_fetched_at()
    }

    pub fn is_stale(&self) -> bool {
        is_stale(self.last_fetched_at(), self.clock.now(), self.ttl)
    }

    pub fn user_count(&self, platform: Platform) -> u64 {
        self.lock_state().user_count(platform)
    }

    pub fn total_users(&self) -> u64 {
        self.lock_state().total_users()
    }

    pub fn is_connected(&self, platform: Platform) -> bool {
        self.lock_state().is_connected(platform)
    }

    pub fn integration_status(&self, platform: Platform) -> String {
        self.lock_state().integration_status(platform).to_string()
    }

    pub fn today_usage(&self) -> UsagePeriod {
        self.lock_state().today_usage()
    }

    pub fn all_time_usage(&self) -> UsagePeriod {
        self.lock_state().all_time_usage()
    }

    pub fn integration_details(&self, platform: Platform) -> Option<serde_json::Value> {
        self.lock_state().integration_details(platform).cloned()
    }

    pub fn integrations(&self) -> Vec<IntegrationSummary> {
        self.lock_state().integrations()
    }

    pub fn recent_activity(&self) -> Vec<Activity> {
        self.lock_state().activity_log().to_vec()
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Interval used by [`OverviewCache::start_default_auto_refresh`].
    pub fn auto_refresh_interval(&self) -> Duration {
        self.auto_refresh_interval
    }

    pub fn auth(&self) -> &AuthGuard {
        &self.auth
    }
}

impl Drop for OverviewCache {
    fn drop(&mut self) {
        events::log_session_ended();
    }
}

/// Builds an [`OverviewCache`] with injected collaborators.
pub struct OverviewCacheBuilder {
    transport: Arc<dyn OverviewTransport>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    context: ExecutionContext,
    config: OverviewConfig,
}

impl OverviewCacheBuilder {
    pub fn new(transport: Arc<dyn OverviewTransport>) -> Self {
        Self {
            transport,
            credentials: Arc::new(MemoryCredentialStore::new()),
            navigator: Arc::new(LoggingNavigator),
            clock: Arc::new(SystemClock),
            context: ExecutionContext::default(),
            config: OverviewConfig::default(),
        }
    }

    /// Builder wired to the HTTP endpoint described by `config`.
    pub fn from_config(config: OverviewConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.api)?;
        Ok(Self::new(Arc::new(transport)).config(config))
    }

    pub fn config(mut self, config: OverviewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn build(self) -> Arc<OverviewCache> {
        events::log_session_started(&self.config.api.endpoint_url());

        let auth = AuthGuard::new(
            self.credentials,
            self.navigator,
            self.context,
            self.config.auth.login_path(),
            self.config.auth.redirect_delay(),
        );

        Arc::new(OverviewCache {
            state: Mutex::new(CacheState::new()),
            transport: self.transport,
            auth,
            clock: self.clock,
            context: self.context,
            ttl: self.config.cache.ttl(),
            auto_refresh_interval: self.config.cache.auto_refresh_interval(),
        })
    }
}
