//! Scripted in-memory transport.
//!
//! Responses are queued per `(method, path-and-query)`; every request is
//! recorded so tests can assert on exactly what went over the wire.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

#[derive(Default)]
struct Script {
    routes: HashMap<(Method, String), VecDeque<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

pub struct FakeTransport {
    base_url: String,
    script: Mutex<Script>,
}

impl FakeTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            script: Mutex::new(Script::default()),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a response for `path` (path plus query string, relative to the base URL).
    ///
    /// Multiple responses for the same route are served in order.
    pub fn respond(&self, method: Method, path: &str, response: HttpResponse) {
        self.script()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Queue a JSON `200 OK`.
    pub fn respond_json(&self, method: Method, path: &str, body: &serde_json::Value) {
        self.respond(method, path, HttpResponse::new(200, body.to_string()));
    }

    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script().requests.clone()
    }

    /// Paths (relative to the base URL) of every request, in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.script()
            .requests
            .iter()
            .map(|r| self.relative(&r.url).to_string())
            .collect()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }

    fn relative<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(self.base_url.as_str()).unwrap_or(url)
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = (request.method, self.relative(&request.url).to_string());
        let mut script = self.script();
        script.requests.push(request);
        script
            .routes
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| ProviderError::NetworkError {
                detail: format!("no scripted response for {} {}", key.0, key.1),
            })
    }
}
