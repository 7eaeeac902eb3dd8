//! Remote fetch primitive for the overview resource.

pub mod errors;
pub mod http;

pub use errors::TransportError;
pub use http::HttpTransport;

use crate::overview::types::OverviewResponse;
use async_trait::async_trait;

/// Fetches the overview envelope from the remote API.
///
/// Implementations return `Ok` for any decoded envelope, including ones whose
/// `status` signals a logical failure; interpreting the envelope is the
/// cache's job.
#[async_trait]
pub trait OverviewTransport: Send + Sync {
    async fn fetch_overview(&self, token: Option<&str>)
    -> Result<OverviewResponse, TransportError>;
}
