//! HTTP Transport
//!
//! `reqwest`-backed [`Transport`] with a fixed base address.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiError, ApiRequest, ApiResult, Transport};
use crate::config::ApiConfig;

/// Shared client for every screen
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, query = ?request.query, "sending request");

        let mut builder = self.client.request(request.method.clone(), url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%url, "request failed: {}", e);
            ApiError::from(e)
        })?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(ApiError::from);
        }

        let message = error_detail(&text)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        tracing::warn!(%url, status = status.as_u16(), "{}", message);

        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(message))
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Message from an error body: FastAPI `detail`, else `mensaje`
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let field = value.get("detail").or_else(|| value.get("mensaje"))?;
    match field {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://localhost:8000", "/menu"), "http://localhost:8000/menu");
        assert_eq!(join_url("http://localhost:8000/", "menu"), "http://localhost:8000/menu");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"detail":"No se encontraron restaurantes con esos criterios"}"#).as_deref(),
            Some("No se encontraron restaurantes con esos criterios")
        );
        assert_eq!(error_detail(r#"{"mensaje":"falló"}"#).as_deref(), Some("falló"));
        assert_eq!(
            error_detail(r#"{"detail":[{"loc":["body"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body"]}]"#)
        );
        assert_eq!(error_detail("<html>oops</html>"), None);
    }

    #[test]
    fn test_transport_uses_config_base() {
        let config = ApiConfig {
            base_url: "https://api.example.com".into(),
            ..ApiConfig::default()
        };
        let transport = HttpTransport::new(&config);
        assert_eq!(transport.url("/ordenes"), "https://api.example.com/ordenes");
    }
}
