//! Injected environment capabilities: where the cache runs and what time it is.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Mutex;

/// Where the cache is running.
///
/// Token storage access, the auto-refresh timer and the delayed login
/// redirect are only available in [`ExecutionContext::Interactive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// A live client session with a user in front of it.
    #[default]
    Interactive,
    /// A non-interactive render pass (e.g. server-side rendering).
    Render,
}

impl ExecutionContext {
    pub fn is_interactive(&self) -> bool {
        matches!(self, ExecutionContext::Interactive)
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
