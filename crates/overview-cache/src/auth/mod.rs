//! Credential access and authentication-failure handling.

pub mod credentials;
pub mod guard;
pub mod navigator;

pub use credentials::{CredentialStore, MemoryCredentialStore};
pub use guard::{AuthGuard, is_auth_error};
pub use navigator::{LoggingNavigator, Navigator};
