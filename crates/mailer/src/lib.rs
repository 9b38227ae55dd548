//! Transactional email dispatch for contact submissions.
//!
//! [`EmailSender`] is the seam between the gateway and the provider;
//! [`ResendClient`] is the production implementation and tests substitute
//! their own.

pub mod config;
pub mod resend;
pub mod sender;
pub mod template;

pub use config::*;
pub use resend::ResendClient;
pub use sender::*;
pub use template::*;
