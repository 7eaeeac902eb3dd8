pub mod types;

pub use types::{
    IntegrationSummary, Overview, OverviewResponse, Platform, TokenUsage, UsagePeriod,
};
