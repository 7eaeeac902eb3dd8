use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Success,
    Warning,
    Info,
}

/// One entry in the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Stable per source rule, e.g. `slack-sync`.
    pub id: String,
    pub kind: ActivityKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}
