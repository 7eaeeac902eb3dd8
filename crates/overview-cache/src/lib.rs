//! overview-cache: Client-side cache for the integrations overview dashboard
//!
//! This library fetches the overview snapshot (user counts, integration
//! status, token usage) from the remote API, keeps it in memory, decides when
//! it is stale, and derives the activity feed shown on the dashboard.
//!
//! # Main Entry Points
//!
//! - [`cache`] - The [`OverviewCache`] context object and its fetch protocol
//! - [`activity`] - Activity feed derivation
//! - [`format`] - Display formatters for counts and costs
//! - [`config`] - Configuration management
//! - [`refresh`] - Background auto-refresh

pub mod activity;
pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod errors;
pub mod events;
pub mod format;
pub mod logging;
pub mod overview;
pub mod refresh;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root for convenience
pub use activity::{Activity, ActivityKind, derive_activity};
pub use auth::{AuthGuard, CredentialStore, LoggingNavigator, MemoryCredentialStore, Navigator};
pub use cache::{
    CacheState, FetchError, FetchOutcome, OverviewCache, OverviewCacheBuilder, is_stale,
};
pub use config::OverviewConfig;
pub use context::{Clock, ExecutionContext, ManualClock, SystemClock};
pub use format::{format_cost, format_count};
pub use overview::types::{
    IntegrationSummary, Overview, OverviewResponse, Platform, TokenUsage, UsagePeriod,
};
pub use refresh::{AutoRefreshHandle, RefreshError};
pub use transport::{HttpTransport, OverviewTransport, TransportError};

// Re-export logging initialization
pub use logging::init_logging;
