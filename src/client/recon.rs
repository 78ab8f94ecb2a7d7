//! HTTP client for the reconnaissance scan service

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::models::{Scan, ScanId, ScanRequest, UpdateDisplayOrderRequest};
use super::ScanApi;
use crate::error::{ApiError, Error, Result};

/// Scan service base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Per-request timeout for the underlying HTTP exchange
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Scan service API client
#[derive(Debug, Clone)]
pub struct ReconClient {
    http: HttpClient,
    base_url: String,
}

impl ReconClient {
    /// Create a client against [`DEFAULT_API_URL`]
    #[allow(dead_code)]
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom base URL (e.g. `http://host:8080/api`)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Other("API base URL must not be empty".to_string()));
        }

        Ok(Self { http, base_url })
    }

    /// The resolved base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header("Content-Type", "application/json")
    }

    /// Send a request and turn non-success statuses into typed errors
    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Scan service returned {}: {}", status, body);

        match status {
            StatusCode::NOT_FOUND => {
                let message = service_message(&body).unwrap_or_else(|| "Resource not found".into());
                Err(ApiError::NotFound(message).into())
            }
            _ => {
                let message = service_message(&body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unexpected status")
                        .to_string()
                });
                Err(ApiError::Service {
                    status: status.as_u16(),
                    message,
                }
                .into())
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies with a `message` or `error` field yield that field; other
/// non-empty bodies are returned as-is.
fn service_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str())
                && !msg.is_empty()
            {
                return Some(msg.to_string());
            }
        }
    }

    Some(body.to_string())
}

#[async_trait]
impl ScanApi for ReconClient {
    async fn list_scans(&self) -> Result<Vec<Scan>> {
        let response = self.execute(self.request(Method::GET, "/scans")).await?;
        Self::decode(response).await
    }

    async fn get_scan(&self, id: ScanId) -> Result<Scan> {
        let path = format!("/scans/{}", id);
        let response = match self.execute(self.request(Method::GET, &path)).await {
            Err(Error::Api(ApiError::NotFound(_))) => {
                return Err(ApiError::NotFound(id.to_string()).into());
            }
            other => other?,
        };
        Self::decode(response).await
    }

    async fn create_scan(&self, request: &ScanRequest) -> Result<Scan> {
        let response = self
            .execute(self.request(Method::POST, "/scans").json(request))
            .await?;
        Self::decode(response).await
    }

    async fn set_display_order(&self, id: ScanId, new_order: i64) -> Result<()> {
        let body = UpdateDisplayOrderRequest {
            scan_id: id,
            new_order,
        };
        self.execute(self.request(Method::PUT, "/scans/order").json(&body))
            .await?;
        Ok(())
    }

    async fn health(&self) -> Result<serde_json::Value> {
        let response = self.execute(self.request(Method::GET, "/health")).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}
