//! Mailer configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "RESEND_API_KEY";

/// Email provider settings. The credential is not part of this struct; it
/// comes from [`API_KEY_ENV`] only.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MailerConfig {
    /// Provider API base URL
    #[validate(url)]
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Sender address (must be on a domain verified with the provider)
    #[validate(email)]
    #[serde(default = "default_from")]
    pub from: String,
    /// Display name for the sender
    #[validate(length(min = 1, max = 100))]
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Inbox that receives submissions
    #[validate(email)]
    #[serde(default = "default_to")]
    pub to: String,
    /// Subject line prefix, followed by the submitter's name
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    /// Request timeout in seconds
    #[validate(range(min = 1, max = 120))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from() -> String {
    "noreply@example.com".to_string()
}

fn default_from_name() -> String {
    "Website Contact Form".to_string()
}

fn default_to() -> String {
    "hello@example.com".to_string()
}

fn default_subject_prefix() -> String {
    "New Contact Form Submission from".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            from: default_from(),
            from_name: default_from_name(),
            to: default_to(),
            subject_prefix: default_subject_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MailerConfig {
    /// `Name <address>` form of the sender.
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from)
    }

    pub fn subject_for(&self, name: &str) -> String {
        format!("{} {}", self.subject_prefix, name)
    }

    /// Endpoint that accepts a single email.
    pub fn emails_endpoint(&self) -> String {
        format!("{}/emails", self.api_url.trim_end_matches('/'))
    }
}
