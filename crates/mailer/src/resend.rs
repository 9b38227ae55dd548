//! Resend HTTP API client.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::MailerConfig;
use crate::sender::{DeliveryReceipt, EmailSender, MailerError, OutgoingEmail};

/// Success body: `{ "id": "..." }`.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

/// Error body. The API uses `message`; older gateways wrap it in `error`.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn describe(self) -> Option<String> {
        self.message.or_else(|| match self.error? {
            serde_json::Value::String(s) => Some(s),
            other => other
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .or_else(|| Some(other.to_string())),
        })
    }
}

/// Sends email through the Resend REST API.
#[derive(Clone)]
pub struct ResendClient {
    endpoint: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl ResendClient {
    pub fn new(config: &MailerConfig, api_key: impl Into<String>) -> Result<Self, MailerError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailerError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.emails_endpoint(),
            api_key: api_key.into(),
            http_client,
        })
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailerError> {
        debug!(endpoint = %self.endpoint, subject = %email.subject, "Sending email");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Email provider request failed");
                MailerError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .unwrap_or_default()
                .describe()
                .unwrap_or(body);
            warn!(status = %status, message = %message, "Email provider rejected message");
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse provider response");
            MailerError::Transport(format!("invalid provider response: {}", e))
        })?;

        Ok(DeliveryReceipt { id: sent.id })
    }
}
