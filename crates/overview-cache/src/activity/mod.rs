//! Activity feed derived from the overview snapshot.
//!
//! The snapshot carries no event history. The feed is synthesized from the
//! current integration state with fixed recency offsets so the dashboard has
//! something ordered to show. It is a display heuristic, not an audit trail.

pub mod derive;
pub mod types;

pub use derive::derive_activity;
pub use types::{Activity, ActivityKind};
