use std::sync::{Mutex, MutexGuard};

/// Bearer-token storage.
///
/// Two slots: the client-side token store, which is preferred and only
/// reachable in an interactive context, and the cookie-backed token used as
/// fallback.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn remove_token(&self);

    fn cookie_token(&self) -> Option<String>;
    fn set_cookie_token(&self, token: &str);
    fn remove_cookie_token(&self);
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
    cookie_token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(token: Option<&str>, cookie_token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.and_then(non_empty)),
            cookie_token: Mutex::new(cookie_token.and_then(non_empty)),
        }
    }
}

fn lock(slot: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

/// Empty strings are treated as "no token".
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn set_token(&self, token: &str) {
        *lock(&self.token) = non_empty(token);
    }

    fn remove_token(&self) {
        lock(&self.token).take();
    }

    fn cookie_token(&self) -> Option<String> {
        lock(&self.cookie_token).clone()
    }

    fn set_cookie_token(&self, token: &str) {
        *lock(&self.cookie_token) = non_empty(token);
    }

    fn remove_cookie_token(&self) {
        lock(&self.cookie_token).take();
    }
}
