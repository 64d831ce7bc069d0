//! Fake transport for testing
//!
//! Serves scripted replies keyed by method and URL path, and records every
//! request it receives so tests can assert on what was (or was not) sent.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::transport::transport_types::{
    HttpRequest, HttpResponse, HttpTransport, Method, TransportError,
};

/// One scripted reply
#[derive(Debug, Clone)]
pub struct FakeReply {
    pub status: u16,
    pub body: String,
    /// Simulated latency before the reply is delivered
    pub delay: Option<Duration>,
    /// Fail the exchange with a network error instead of replying
    pub network_error: Option<String>,
}

impl FakeReply {
    /// 200 with a JSON body
    pub fn json(value: serde_json::Value) -> Self {
        Self::status(200, &value.to_string())
    }

    /// Arbitrary status and body
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
            network_error: None,
        }
    }

    /// Network failure
    pub fn network_error(msg: &str) -> Self {
        Self {
            status: 0,
            body: String::new(),
            delay: None,
            network_error: Some(msg.to_string()),
        }
    }

    /// Delay delivery of this reply
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Default)]
struct FakeState {
    queued: HashMap<(Method, String), VecDeque<FakeReply>>,
    sticky: HashMap<(Method, String), FakeReply>,
    requests: Vec<HttpRequest>,
}

/// Fake transport for testing (uses scripted replies)
///
/// Clones share state, so a test can keep one handle for assertions while
/// the clients own another.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot reply; queued replies are served first, in order
    pub fn enqueue(&self, method: Method, path: &str, reply: FakeReply) -> &Self {
        self.lock()
            .queued
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Reply used whenever no queued reply is left for the route
    pub fn always(&self, method: Method, path: &str, reply: FakeReply) -> &Self {
        self.lock().sticky.insert((method, path.to_string()), reply);
        self
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for one path
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.path() == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_reply(&self, request: &HttpRequest) -> Option<FakeReply> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        let key = (request.method, request.path());
        if let Some(reply) = state.queued.get_mut(&key).and_then(VecDeque::pop_front) {
            return Some(reply);
        }
        state.sticky.get(&key).cloned()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = self.next_reply(&request);

        let Some(reply) = reply else {
            return Ok(HttpResponse {
                status: 404,
                body: format!(r#"{{"detail":"no fake route for {}"}}"#, request.path()),
            });
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(msg) = reply.network_error {
            return Err(TransportError::Network(msg));
        }
        Ok(HttpResponse {
            status: reply.status,
            body: reply.body,
        })
    }
}
