//! Backend API Bindings
//!
//! Frontend bindings to the restaurant backend, organized by domain.
//! Every call goes through a [`Transport`], so screens never touch
//! `reqwest` directly.

mod error;
mod http;
mod menu;
mod orders;
mod reports;
mod restaurants;
mod reviews;
mod users;

#[cfg(test)]
pub mod mock;

use std::future::Future;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::{ApiError, ApiResult};
pub use http::HttpTransport;
pub use reqwest::Method;

// Re-export all public items
pub use menu::*;
pub use orders::*;
pub use reports::*;
pub use restaurants::*;
pub use reviews::*;
pub use users::*;

// ========================
// Requests
// ========================

/// One call against the backend, independent of the HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Value of a query parameter, if present
    #[cfg(test)]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Sends requests and returns the decoded JSON body.
///
/// Browser futures are not `Send`, hence `?Send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value>;
}

// ========================
// Responses
// ========================

/// Acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl Ack {
    /// Lenient decode: endpoints that answer with a list or nothing still ack.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Ack::default(),
        }
    }
}

/// Receipt of a successful mutation.
///
/// The affected collection is stale once this exists; screens pipe it into
/// their refresh instead of relying on call ordering.
#[must_use = "refresh the affected collection after a mutation"]
#[derive(Debug, Clone, PartialEq)]
pub struct Mutated<T>(pub T);

impl<T> Mutated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Run the refresh this mutation made necessary.
    pub async fn refresh<R, F, Fut>(self, refresh: F) -> Refreshed<T, R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<R>>,
    {
        Refreshed {
            ack: self.0,
            refreshed: refresh().await,
        }
    }
}

/// A successful mutation and the reload that followed it.
///
/// The reload may fail on its own; the mutation still happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed<T, R> {
    pub ack: T,
    pub refreshed: ApiResult<R>,
}

// ========================
// Helpers
// ========================

/// Characters kept verbatim in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'@');

/// Percent-encode user input used as a single path segment
pub fn segment(raw: &str) -> String {
    utf8_percent_encode(raw.trim(), SEGMENT).to_string()
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(ApiError::from)
}

/// Lookups answer `200 {"mensaje": "..."}` when nothing matches.
pub(crate) fn decode_found<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    if let Some(message) = lookup_miss(&value) {
        return Err(ApiError::NotFound(message));
    }
    decode(value)
}

fn lookup_miss(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if object.contains_key("_id") {
        return None;
    }
    object.get("mensaje")?.as_str().map(str::to_string)
}

/// Reports and aggregates wrap their rows: `{"<field>": [...]}`
pub(crate) fn decode_field<T: DeserializeOwned>(mut value: Value, field: &str) -> ApiResult<T> {
    let inner = value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("missing field `{}`", field)))?;
    decode(inner)
}
