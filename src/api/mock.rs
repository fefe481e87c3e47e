//! Recording transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiError, ApiRequest, ApiResult, Method, Transport};

struct Route {
    method: Method,
    path: String,
    responses: VecDeque<ApiResult<Value>>,
}

/// Replays canned responses per `(method, path)` and records every request.
///
/// Queued responses are consumed in order; the last one repeats.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, response: ApiResult<Value>) -> &Self {
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|r| r.method == method && r.path == path) {
            Some(route) => route.responses.push_back(response),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                responses: VecDeque::from([response]),
            }),
        }
        self
    }

    pub fn ok(&self, method: Method, path: &str, body: Value) -> &Self {
        self.respond(method, path, Ok(body))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls(&self, method: &Method, path: &str) -> Vec<ApiRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.calls(method, path).len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        self.requests.borrow_mut().push(request.clone());

        let mut routes = self.routes.borrow_mut();
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path)
            .ok_or_else(|| {
                ApiError::Transport(format!("no mock for {} {}", request.method, request.path))
            })?;

        if route.responses.len() > 1 {
            route.responses.pop_front().unwrap_or(Ok(Value::Null))
        } else {
            route.responses.front().cloned().unwrap_or(Ok(Value::Null))
        }
    }
}
