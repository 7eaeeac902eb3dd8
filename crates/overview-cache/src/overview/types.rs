use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Status value that marks an integration as live. Anything else is treated
/// as not connected.
pub const STATUS_CONNECTED: &str = "connected";
pub const STATUS_DISCONNECTED: &str = "disconnected";

/// Response status the API uses for a logically successful call.
pub const RESPONSE_STATUS_SUCCESS: &str = "success";

/// Messaging platforms shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    WhatsApp,
    Slack,
    Teams,
}

impl Platform {
    /// All platforms in dashboard display order.
    pub const ALL: [Platform; 3] = [Platform::WhatsApp, Platform::Slack, Platform::Teams];

    /// Key used in the API's per-platform maps.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::WhatsApp => "whatsapp",
            Platform::Slack => "slack",
            Platform::Teams => "teams",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::WhatsApp => "WhatsApp",
            Platform::Slack => "Slack",
            Platform::Teams => "Teams",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Usage figures for one period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UsagePeriod {
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub tokens: u64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(default)]
    pub today: UsagePeriod,
    #[serde(default)]
    pub all_time: UsagePeriod,
}

/// Server-provided summary of integration status, user counts and token usage.
///
/// Maps are keyed by platform name so unknown platforms and statuses pass
/// through without failing deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(default)]
    pub user_counts: HashMap<String, u64>,
    #[serde(default)]
    pub integration_status: HashMap<String, String>,
    #[serde(default)]
    pub token_usage: TokenUsage,
    /// Free-form per-platform metadata (phone number, team name, service URL).
    #[serde(default)]
    pub integration_details: HashMap<String, serde_json::Value>,
}

impl Overview {
    pub fn user_count(&self, platform: Platform) -> u64 {
        self.user_counts.get(platform.key()).copied().unwrap_or(0)
    }

    pub fn status(&self, platform: Platform) -> &str {
        self.integration_status
            .get(platform.key())
            .map(String::as_str)
            .unwrap_or(STATUS_DISCONNECTED)
    }

    pub fn is_connected(&self, platform: Platform) -> bool {
        self.status(platform) == STATUS_CONNECTED
    }

    pub fn details(&self, platform: Platform) -> Option<&serde_json::Value> {
        self.integration_details.get(platform.key())
    }
}

/// Envelope returned by the overview endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<Overview>,
    #[serde(default)]
    pub message: Option<String>,
}

impl OverviewResponse {
    pub fn is_success(&self) -> bool {
        self.status == RESPONSE_STATUS_SUCCESS
    }
}

/// UI-ready summary of one integration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationSummary {
    pub platform: Platform,
    pub name: &'static str,
    pub status: String,
    pub connected: bool,
    pub users: u64,
    pub details: Option<serde_json::Value>,
}

impl IntegrationSummary {
    /// Summaries for every platform, in display order.
    ///
    /// An absent snapshot yields disconnected platforms with zero users.
    pub fn from_overview(overview: Option<&Overview>) -> Vec<IntegrationSummary> {
        Platform::ALL
            .iter()
            .map(|&platform| IntegrationSummary {
                platform,
                name: platform.display_name(),
                status: overview
                    .map(|o| o.status(platform).to_string())
                    .unwrap_or_else(|| STATUS_DISCONNECTED.to_string()),
                connected: overview.is_some_and(|o| o.is_connected(platform)),
                users: overview.map(|o| o.user_count(platform)).unwrap_or(0),
                details: overview.and_then(|o| o.details(platform).cloned()),
            })
            .collect()
    }
}
