use tracing::{error, info};

pub fn log_session_started(endpoint: &str) {
    info!(
        event = "cache.session.started",
        version = env!("CARGO_PKG_VERSION"),
        endpoint = endpoint
    );
}

pub fn log_session_ended() {
    info!(event = "cache.session.ended");
}

pub fn log_error(error: &dyn std::error::Error) {
    error!(
        event = "cache.session.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}
