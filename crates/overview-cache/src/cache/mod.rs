//! Overview cache: staleness policy, cached state and fetch coordination.

pub mod coordinator;
pub mod staleness;
pub mod store;

pub use coordinator::{
    AUTH_REQUIRED_MESSAGE, FETCH_FALLBACK_MESSAGE, FetchError, FetchOutcome, OverviewCache,
    OverviewCacheBuilder,
};
pub use staleness::is_stale;
pub use store::CacheState;
