//! Test doubles shared by unit tests across modules.

use crate::auth::Navigator;
use crate::overview::types::{Overview, OverviewResponse};
use crate::transport::{OverviewTransport, TransportError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

pub fn connected_overview(slack_users: u64) -> Overview {
    let mut overview = Overview {
        user_counts: HashMap::from([
            ("slack".to_string(), slack_users),
            ("teams".to_string(), 4),
            ("whatsapp".to_string(), 0),
        ]),
        integration_status: HashMap::from([
            ("slack".to_string(), "connected".to_string()),
            ("teams".to_string(), "connected".to_string()),
            ("whatsapp".to_string(), "disconnected".to_string()),
        ]),
        ..Default::default()
    };
    overview.token_usage.today.messages = 120;
    overview
}

pub fn success(overview: Overview) -> Result<OverviewResponse, TransportError> {
    Ok(OverviewResponse {
        status: "success".to_string(),
        data: Some(overview),
        message: Some("Overview loaded".to_string()),
    })
}

/// Transport that replays queued results and counts calls.
///
/// When the queue is empty it answers with a default connected overview.
/// With a gate installed, each call waits for one permit before answering.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<OverviewResponse, TransportError>>>,
    calls: AtomicUsize,
    tokens: Mutex<Vec<Option<String>>>,
    gate: Option<Semaphore>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn push(&self, result: Result<OverviewResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(result);
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl OverviewTransport for ScriptedTransport {
    async fn fetch_overview(
        &self,
        token: Option<&str>,
    ) -> Result<OverviewResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.map(str::to_string));

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| success(connected_overview(10)))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn count(&self) -> usize {
        self.redirects.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self, login_path: &str) {
        self.redirects.lock().unwrap().push(login_path.to_string());
    }
}
