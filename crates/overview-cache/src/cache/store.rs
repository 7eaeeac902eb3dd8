use crate::activity::Activity;
use crate::overview::types::{
    IntegrationSummary, Overview, Platform, STATUS_DISCONNECTED, UsagePeriod,
};
use chrono::{DateTime, Utc};

/// Cached overview state with fetch tracking.
///
/// Encapsulates:
/// - `snapshot`: Last successfully fetched overview
/// - `loading`: Whether a fetch is in flight
/// - `error`: Message from the last failed (non-auth) fetch
/// - `last_fetched_at`: Timestamp of last successful fetch
/// - `activity_log`: Feed derived from the last successful fetch
///
/// Only the fetch coordinator mutates it; readers get borrowed views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheState {
    snapshot: Option<Overview>,
    loading: bool,
    error: Option<String>,
    last_fetched_at: Option<DateTime<Utc>>,
    activity_log: Vec<Activity>,
}

impl CacheState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&Overview> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_at
    }

    pub fn activity_log(&self) -> &[Activity] {
        &self.activity_log
    }

    /// Mark a fetch as started: loading on, previous error cleared.
    pub(crate) fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn end_fetch(&mut self) {
        self.loading = false;
    }

    /// Replace snapshot, fetch time and activity log in one step.
    pub(crate) fn apply_success(
        &mut self,
        snapshot: Overview,
        activity_log: Vec<Activity>,
        fetched_at: DateTime<Utc>,
    ) {
        self.snapshot = Some(snapshot);
        self.activity_log = activity_log;
        self.last_fetched_at = Some(fetched_at);
    }

    /// Record a failed fetch. Snapshot and activity log stay as last known good.
    pub(crate) fn apply_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn user_count(&self, platform: Platform) -> u64 {
        self.snapshot
            .as_ref()
            .map(|s| s.user_count(platform))
            .unwrap_or(0)
    }

    /// Users across all dashboard platforms.
    pub fn total_users(&self) -> u64 {
        Platform::ALL
            .iter()
            .map(|&p| self.user_count(p))
            .fold(0u64, u64::saturating_add)
    }

    pub fn is_connected(&self, platform: Platform) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.is_connected(platform))
    }

    pub fn integration_status(&self, platform: Platform) -> &str {
        self.snapshot
            .as_ref()
            .map(|s| s.status(platform))
            .unwrap_or(STATUS_DISCONNECTED)
    }

    pub fn today_usage(&self) -> UsagePeriod {
        self.snapshot
            .as_ref()
            .map(|s| s.token_usage.today)
            .unwrap_or_default()
    }

    pub fn all_time_usage(&self) -> UsagePeriod {
        self.snapshot
            .as_ref()
            .map(|s| s.token_usage.all_time)
            .unwrap_or_default()
    }

    pub fn integration_details(&self, platform: Platform) -> Option<&serde_json::Value> {
        self.snapshot.as_ref().and_then(|s| s.details(platform))
    }

    pub fn integrations(&self) -> Vec<IntegrationSummary> {
        IntegrationSummary::from_overview(self.snapshot.as_ref())
    }
}
