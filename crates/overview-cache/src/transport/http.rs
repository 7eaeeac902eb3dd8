//! reqwest-backed transport for the overview endpoint.

use crate::config::ApiConfig;
use crate::overview::types::OverviewResponse;
use crate::transport::{OverviewTransport, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a transport for the endpoint described by `api`.
    pub fn new(api: &ApiConfig) -> Result<Self, TransportError> {
        Self::with_endpoint(api.endpoint_url(), api.timeout())
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull `message` out of a JSON error body, if the body is JSON and has one.
fn error_body_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl OverviewTransport for HttpTransport {
    async fn fetch_overview(
        &self,
        token: Option<&str>,
    ) -> Result<OverviewResponse, TransportError> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        debug!(
            event = "cache.transport.request_started",
            endpoint = %self.endpoint,
            authenticated = token.is_some()
        );

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(
                    event = "cache.transport.error_body_unreadable",
                    status = status.as_u16(),
                    error = %e
                );
                String::new()
            });
            return Err(TransportError::Response {
                status: status.as_u16(),
                message: error_body_message(&body),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_extracts_message() {
        assert_eq!(
            error_body_message(r#"{"status":"error","message":"Token expired"}"#),
            Some("Token expired".to_string())
        );
    }

    #[test]
    fn test_error_body_message_tolerates_non_json() {
        assert_eq!(error_body_message("<html>Bad Gateway</html>"), None);
        assert_eq!(error_body_message(r#"{"message": 42}"#), None);
        assert_eq!(error_body_message(""), None);
    }

    #[test]
    fn test_new_uses_configured_endpoint() {
        let api = ApiConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            overview_path: None,
            timeout_secs: Some(2),
        };
        let transport = HttpTransport::new(&api).unwrap();
        assert_eq!(
            transport.endpoint(),
            "http://127.0.0.1:9/api/dashboard/overview"
        );
    }
}
