//! In-memory transport for tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::models::HttpMethod;
use crate::network::transport::{ApiRequest, RawResponse, Transport};

type Route = (HttpMethod, String);

#[derive(Default)]
struct Inner {
    routes: HashMap<Route, VecDeque<Result<RawResponse>>>,
    sticky: HashMap<Route, RawResponse>,
    log: Vec<ApiRequest>,
}

/// Serves canned responses per `(method, path)` and records every request.
///
/// Queued responses are served once, in order; a route set with
/// `always` answers the same way forever. Unknown routes get a 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Mutex<Inner>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, Ok(RawResponse { status, body: body.to_string() }))
    }

    pub fn respond_raw(&self, method: HttpMethod, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Ok(RawResponse { status, body: body.to_string() }))
    }

    pub fn fail(&self, method: HttpMethod, path: &str, message: &str) -> &Self {
        self.push(method, path, Err(StoreError::Transport(message.to_string())))
    }

    pub fn always(&self, method: HttpMethod, path: &str, status: u16, body: Value) -> &Self {
        self.inner.lock().unwrap().sticky.insert(
            (method, path.to_string()),
            RawResponse { status, body: body.to_string() },
        );
        self
    }

    fn push(&self, method: HttpMethod, path: &str, response: Result<RawResponse>) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    /// Every request sent so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.lock().unwrap().log.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.log.push(request.clone());
        let route = (request.method, request.path);
        if let Some(response) = inner.routes.get_mut(&route).and_then(|q| q.pop_front()) {
            return response;
        }
        if let Some(response) = inner.sticky.get(&route) {
            return Ok(response.clone());
        }
        Ok(RawResponse {
            status: 404,
            body: String::from("{\"message\":\"Not Found\"}"),
        })
    }
}
