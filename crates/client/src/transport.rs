//! Outbound request for a submission.

use async_trait::async_trait;
use contact_core::ContactRequest;
use thiserror::Error;
use tracing::debug;

/// Any response the gateway produced, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Parsed JSON body, `Null` when the body was empty or not JSON
    /// (a proxy error page, a plain-text 413).
    pub body: serde_json::Value,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` or `error` string from the body, whichever applies.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(|v| v.as_str())
    }
}

/// No usable response arrived.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &ContactRequest) -> Result<TransportResponse, TransportError>;
}

/// JSON over HTTP with the platform's default timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: &ContactRequest) -> Result<TransportResponse, TransportError> {
        debug!(endpoint = %self.endpoint, "Posting contact submission");

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            debug!(status, "Response body is not JSON");
            serde_json::Value::Null
        });

        Ok(TransportResponse { status, body })
    }
}
