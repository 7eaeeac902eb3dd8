//! Background auto-refresh for the overview cache.
//!
//! Each tick performs a lazy fetch, so the network is only hit once the
//! snapshot has gone stale. Ticks that land while a fetch is in flight are
//! skipped.

use crate::cache::OverviewCache;
use crate::config::defaults::DEFAULT_AUTO_REFRESH_INTERVAL_SECS;
use crate::errors::OverviewCacheError;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Refresh interval used when nothing else is configured (5 minutes).
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(DEFAULT_AUTO_REFRESH_INTERVAL_SECS);

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Auto-refresh is only available in an interactive context")]
    NonInteractiveContext,

    #[error("Auto-refresh interval must be greater than zero")]
    InvalidInterval,

    #[error("Auto-refresh requires a running tokio runtime")]
    NoRuntime,
}

impl OverviewCacheError for RefreshError {
    fn error_code(&self) -> &'static str {
        match self {
            RefreshError::NonInteractiveContext => "REFRESH_NON_INTERACTIVE",
            RefreshError::InvalidInterval => "REFRESH_INVALID_INTERVAL",
            RefreshError::NoRuntime => "REFRESH_NO_RUNTIME",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, RefreshError::InvalidInterval)
    }
}

/// Running auto-refresh task. Dropping the handle stops it.
#[derive(Debug)]
pub struct AutoRefreshHandle {
    task: JoinHandle<()>,
    interval: Duration,
}

impl AutoRefreshHandle {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the timer. A fetch already in progress is abandoned.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for AutoRefreshHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!(event = "cache.refresh.stopped");
        }
        self.task.abort();
    }
}

impl OverviewCache {
    /// Start periodic lazy fetches every `interval`.
    ///
    /// The first tick fires one interval after starting. The task holds a weak
    /// reference, so it ends on its own once the cache is dropped.
    pub fn start_auto_refresh(
        self: &Arc<Self>,
        interval: Duration,
    ) -> Result<AutoRefreshHandle, RefreshError> {
        if !self.context().is_interactive() {
            return Err(RefreshError::NonInteractiveContext);
        }
        if interval.is_zero() {
            return Err(RefreshError::InvalidInterval);
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| RefreshError::NoRuntime)?;

        let cache = Arc::downgrade(self);
        let task = runtime.spawn(refresh_loop(cache, interval));

        info!(
            event = "cache.refresh.started",
            interval_secs = interval.as_secs()
        );
        Ok(AutoRefreshHandle { task, interval })
    }

    /// Start auto-refresh with the configured interval.
    pub fn start_default_auto_refresh(self: &Arc<Self>) -> Result<AutoRefreshHandle, RefreshError> {
        self.start_auto_refresh(self.auto_refresh_interval())
    }
}

async fn refresh_loop(weak: Weak<OverviewCache>, period: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(cache) = weak.upgrade() else {
            debug!(event = "cache.refresh.cache_dropped");
            return;
        };

        if cache.is_loading() {
            debug!(event = "cache.refresh.tick_skipped", reason = "fetch in flight");
            continue;
        }

        let outcome = cache.fetch_overview(false).await;
        debug!(event = "cache.refresh.tick_completed", success = outcome.success);
    }
}
