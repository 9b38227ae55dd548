//! HTML body for a contact submission.
//!
//! Submission fields arrive already escaped; the client identifier comes from
//! request headers and is escaped here.

use chrono::{DateTime, Utc};
use contact_core::{limits::MAX_NAME_LEN, sanitize, ValidSubmission};
use uuid::Uuid;

/// Context that is not part of the submission itself.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub client_id: String,
    pub received_at: DateTime<Utc>,
    pub reference: Uuid,
}

impl SubmissionContext {
    pub fn now(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            received_at: Utc::now(),
            reference: Uuid::new_v4(),
        }
    }
}

pub fn render_contact_email(submission: &ValidSubmission, ctx: &SubmissionContext) -> String {
    let client_id = sanitize(&ctx.client_id, MAX_NAME_LEN);
    let message = submission.message().replace('\n', "<br>");
    let received = ctx.received_at.format("%Y-%m-%d %H:%M:%S UTC");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>New Contact Form Submission</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2 style="color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px;">New Contact Form Submission</h2>
  <table style="width: 100%; border-collapse: collapse;">
    <tr><td style="padding: 8px; font-weight: bold; width: 160px;">Name:</td><td style="padding: 8px;">{name}</td></tr>
    <tr><td style="padding: 8px; font-weight: bold;">Email:</td><td style="padding: 8px;"><a href="mailto:{email}">{email}</a></td></tr>
    <tr><td style="padding: 8px; font-weight: bold;">Business Type:</td><td style="padding: 8px;">{business_type}</td></tr>
    <tr><td style="padding: 8px; font-weight: bold;">Service Interest:</td><td style="padding: 8px;">{service_interest}</td></tr>
  </table>
  <h3 style="color: #2c3e50;">Message</h3>
  <div style="background: #f8f9fa; padding: 15px; border-left: 4px solid #3498db;">{message}</div>
  <p style="font-size: 12px; color: #7f8c8d; margin-top: 30px;">
    Submitted: {received}<br>
    Client: {client_id}<br>
    Reference: {reference}
  </p>
</body>
</html>
"#,
        name = submission.name(),
        email = submission.email(),
        business_type = submission.business_type_label(),
        service_interest = submission.service_interest_label(),
        message = message,
        received = received,
        client_id = client_id,
        reference = ctx.reference,
    )
}
