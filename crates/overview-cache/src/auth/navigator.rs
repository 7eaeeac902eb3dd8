use tracing::info;

/// Sends the user to the login surface.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self, login_path: &str);
}

/// Navigator for hosts without a routing layer; records the redirect in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn redirect_to_login(&self, login_path: &str) {
        info!(event = "cache.auth.redirect_to_login", login_path = login_path);
    }
}
