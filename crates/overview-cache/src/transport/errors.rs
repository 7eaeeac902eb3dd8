use crate::errors::OverviewCacheError;

/// Failure talking to the overview endpoint.
///
/// An HTTP status can surface in two shapes: `Status` when the HTTP client
/// itself reports it, and `Response` when the server answered with an error
/// body that was decoded. Both are checked when classifying auth failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed with HTTP status {status}")]
    Status { status: u16 },

    #[error(
        "Server responded with HTTP status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Response {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid response body: {message}")]
    Decode { message: String },
}

impl TransportError {
    /// HTTP status from either error shape, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status } | TransportError::Response { status, .. } => {
                Some(*status)
            }
            TransportError::Network { .. } | TransportError::Decode { .. } => None,
        }
    }

    /// Message supplied by the server in a structured error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Response { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            TransportError::Status {
                status: status.as_u16(),
            }
        } else if error.is_decode() {
            TransportError::Decode {
                message: error.to_string(),
            }
        } else {
            TransportError::Network {
                message: error.to_string(),
            }
        }
    }
}

impl OverviewCacheError for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            TransportError::Status { .. } => "TRANSPORT_HTTP_STATUS",
            TransportError::Response { .. } => "TRANSPORT_ERROR_RESPONSE",
            TransportError::Network { .. } => "TRANSPORT_NETWORK",
            TransportError::Decode { .. } => "TRANSPORT_DECODE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self.http_status(), Some(400..=499))
    }
}
