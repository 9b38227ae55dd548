//! Response bodies and the error-to-response mapping.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contact_core::Error;
use serde::{Deserialize, Serialize};
use telemetry::{HealthReport, MetricsSnapshot};

/// Shown to the submitter after a successful send, and after a honeypot hit.
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// Success body: `{ "message": "..." }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn sent() -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Error body: `{ "error": "..." }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    #[serde(flatten)]
    pub report: HealthReport,
    pub mailer_configured: bool,
    pub tracked_clients: usize,
    pub metrics: MetricsSnapshot,
}

/// Gateway error ready to be written to the wire.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub response: ErrorResponse,
    pub retry_after: Option<u64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.response)).into_response();

        if let Some(retry_after) = self.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        }

        response
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self {
            status,
            code: err.code().code(),
            response: ErrorResponse {
                error: err.public_message(),
            },
            retry_after: err.retry_after(),
        }
    }
}
