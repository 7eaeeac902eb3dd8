use crate::auth::credentials::CredentialStore;
use crate::auth::navigator::Navigator;
use crate::context::ExecutionContext;
use crate::transport::TransportError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

const HTTP_UNAUTHORIZED: u16 = 401;

/// Clears the pending-redirect flag when dropped, including when the redirect
/// task is cancelled by runtime shutdown.
struct PendingRedirect(Arc<AtomicBool>);

impl Drop for PendingRedirect {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Whether a transport failure means the credentials were rejected.
///
/// Matches a 401 reported by the HTTP client (`Status`) or carried by a
/// decoded error response (`Response`).
pub fn is_auth_error(error: &TransportError) -> bool {
    match error {
        TransportError::Status { status } => *status == HTTP_UNAUTHORIZED,
        TransportError::Response { status, .. } => *status == HTTP_UNAUTHORIZED,
        TransportError::Network { .. } | TransportError::Decode { .. } => false,
    }
}

/// Resolves bearer tokens and performs the side effects of an auth failure.
pub struct AuthGuard {
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    context: ExecutionContext,
    login_path: String,
    redirect_delay: Duration,
    /// Set while a redirect is scheduled; concurrent failures coalesce onto it.
    redirect_pending: Arc<AtomicBool>,
}

impl AuthGuard {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        context: ExecutionContext,
        login_path: impl Into<String>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            credentials,
            navigator,
            context,
            login_path: login_path.into(),
            redirect_delay,
            redirect_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Token to send with the next request.
    ///
    /// Prefers the client-side store (interactive context only), then the cookie.
    pub fn resolve_token(&self) -> Option<String> {
        if self.context.is_interactive()
            && let Some(token) = self.credentials.token()
        {
            return Some(token);
        }
        self.credentials.cookie_token()
    }

    pub fn is_redirect_pending(&self) -> bool {
        self.redirect_pending.load(Ordering::SeqCst)
    }

    /// Clear stored credentials and send the user to the login surface.
    ///
    /// Safe to call repeatedly: credential clearing is idempotent and at most
    /// one redirect is pending at a time.
    pub fn handle_auth_failure(&self) {
        warn!(
            event = "cache.auth.failure_detected",
            interactive = self.context.is_interactive()
        );

        if self.context.is_interactive() {
            self.credentials.remove_token();
        }
        self.credentials.remove_cookie_token();

        if self.context.is_interactive() {
            self.schedule_redirect();
        }
    }

    fn schedule_redirect(&self) {
        if self.redirect_pending.swap(true, Ordering::SeqCst) {
            debug!(event = "cache.auth.redirect_already_pending");
            return;
        }

        let navigator = Arc::clone(&self.navigator);
        let pending = PendingRedirect(Arc::clone(&self.redirect_pending));
        let login_path = self.login_path.clone();
        let delay = self.redirect_delay;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                info!(
                    event = "cache.auth.redirect_scheduled",
                    login_path = %login_path,
                    delay_ms = delay.as_millis() as u64
                );
                handle.spawn(async move {
                    let _pending = pending;
                    tokio::time::sleep(delay).await;
                    navigator.redirect_to_login(&login_path);
                });
            }
            Err(_) => {
                debug!(event = "cache.auth.redirect_immediate", reason = "no async runtime");
                navigator.redirect_to_login(&login_path);
                drop(pending);
            }
        }
    }
}
