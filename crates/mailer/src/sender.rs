//! The provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fully formed message in the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider message id, when the provider returned one
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum MailerError {
    /// The provider answered and refused the message.
    #[error("provider rejected email ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// No usable answer from the provider.
    #[error("provider unreachable: {0}")]
    Transport(String),

    #[error("mailer configuration: {0}")]
    Config(String),
}

/// Sends one email. Implemented by the real provider client and by test
/// doubles.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailerError>;
}
