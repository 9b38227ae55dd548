//! Unified error types for the submission gateway.
//!
//! Each error maps to exactly one HTTP status and one user-facing message.
//! Error codes:
//! - GATE_001: Method not allowed
//! - GATE_002: Server misconfigured
//! - RATE_001: Rate limit exceeded
//! - VALID_001: Validation failed
//! - MAIL_001: Email delivery failed
//! - INT_001: Internal error

use thiserror::Error;

use crate::validation::ValidationFailure;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// GATE_001: Only POST and OPTIONS are served
    MethodNotAllowed,
    /// GATE_002: Email provider credential missing
    ServerMisconfigured,
    /// RATE_001: Too many submissions from one client
    RateLimited,
    /// VALID_001: Submission broke a field rule
    ValidationFailed,
    /// MAIL_001: Provider refused the message
    EmailDeliveryFailed,
    /// INT_001: Anything unexpected
    InternalError,
}

impl ErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "GATE_001",
            Self::ServerMisconfigured => "GATE_002",
            Self::RateLimited => "RATE_001",
            Self::ValidationFailed => "VALID_001",
            Self::EmailDeliveryFailed => "MAIL_001",
            Self::InternalError => "INT_001",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::ServerMisconfigured => 500,
            Self::RateLimited => 429,
            Self::ValidationFailed => 400,
            Self::EmailDeliveryFailed => 400,
            Self::InternalError => 500,
        }
    }
}

/// Unified error type for the submission gateway.
///
/// `Display` is for logs; [`Error::public_message`] is what callers see.
#[derive(Debug, Error)]
pub enum Error {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("server misconfigured: {0}")]
    ServerMisconfigured(String),

    #[error("rate limited: {client}")]
    RateLimited {
        client: String,
        retry_after: Option<u64>,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        Self::Validation(ValidationFailure::MalformedBody)
    }
}

impl Error {
    pub fn misconfigured(msg: impl Into<String>) -> Self {
        Self::ServerMisconfigured(msg.into())
    }

    pub fn rate_limited(client: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimited {
            client: client.into(),
            retry_after,
        }
    }

    pub fn email_delivery(msg: impl Into<String>) -> Self {
        Self::EmailDelivery(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            Self::ServerMisconfigured(_) => ErrorCode::ServerMisconfigured,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::EmailDelivery(_) => ErrorCode::EmailDeliveryFailed,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// Message safe to return to the submitter. Internal detail stays in logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MethodNotAllowed => "Method not allowed".into(),
            Self::ServerMisconfigured(_) => "Server configuration error".into(),
            Self::RateLimited { .. } => {
                "Too many requests. Please try again later.".into()
            }
            Self::Validation(failure) => failure.to_string(),
            Self::EmailDelivery(_) => "Failed to send email. Please try again later.".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
