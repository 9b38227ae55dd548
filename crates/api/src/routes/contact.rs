//! Contact submission endpoint.
//!
//! Steps run in a fixed order and the first failure ends the request:
//! method gate, configuration gate, rate limit, honeypot, sanitize,
//! validate, dispatch. Headers are added by the router's middleware.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contact_core::{validate, ContactRequest, Error, ValidSubmission};
use mailer::{render_contact_email, EmailSender, MailerError, OutgoingEmail, SubmissionContext};
use std::time::Instant;
use telemetry::{health, metrics};
use tracing::{debug, error, info, warn};

use crate::extractors::ClientIp;
use crate::middleware::rate_limit::Admission;
use crate::response::{ApiError, MessageResponse};
use crate::state::AppState;

/// Any method on the contact route. Only `POST` is processed; `OPTIONS`
/// answers the CORS preflight.
pub async fn contact_handler(
    State(state): State<AppState>,
    method: Method,
    ClientIp(client): ClientIp,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        metrics().method_rejected.inc();
        debug!(%method, "Rejected non-POST request");
        return Err(Error::MethodNotAllowed.into());
    }

    metrics().submissions_received.inc();

    let Some(mailer) = state.mailer.as_ref() else {
        error!("Submission refused: email provider credential is not configured");
        return Err(Error::misconfigured("email provider credential missing").into());
    };

    if let Admission::Rejected { retry_after } = state.rate_limiter.check(&client) {
        metrics().rate_limited.inc();
        warn!(client = %client, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
        let retry_after = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        return Err(Error::rate_limited(client, Some(retry_after)).into());
    }

    let request = ContactRequest::from_json(&body).map_err(|e| {
        metrics().validation_failed.inc();
        debug!(client = %client, payload_size = body.len(), "Unparseable submission body");
        e
    })?;

    if request.is_automated() {
        metrics().honeypot_caught.inc();
        info!(client = %client, "Honeypot field filled; discarding submission");
        return Ok(Json(MessageResponse::sent()).into_response());
    }

    let submission = validate(request.sanitize()).map_err(|failure| {
        metrics().validation_failed.inc();
        debug!(client = %client, reason = %failure, "Submission failed validation");
        Error::from(failure)
    })?;

    dispatch(&state, mailer.as_ref(), &submission, &client).await?;

    Ok(Json(MessageResponse::sent()).into_response())
}

async fn dispatch(
    state: &AppState,
    mailer: &dyn EmailSender,
    submission: &ValidSubmission,
    client: &str,
) -> Result<(), Error> {
    let ctx = SubmissionContext::now(client);
    let email = OutgoingEmail {
        from: state.mail.sender(),
        to: vec![state.mail.to.clone()],
        reply_to: submission.email().to_string(),
        subject: state.mail.subject_for(submission.name()),
        html: render_contact_email(submission, &ctx),
    };

    let start = Instant::now();
    let result = mailer.send(email).await;
    metrics()
        .dispatch_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    match result {
        Ok(receipt) => {
            metrics().emails_sent.inc();
            health().mailer.set_healthy();
            info!(
                reference = %ctx.reference,
                provider_id = receipt.id.as_deref().unwrap_or("-"),
                client = %client,
                "Contact email sent"
            );
            Ok(())
        }
        Err(MailerError::Rejected { status, message }) => {
            metrics().email_failures.inc();
            health()
                .mailer
                .set_unhealthy(format!("provider rejected email ({status})"));
            error!(reference = %ctx.reference, status, message = %message, "Email provider rejected message");
            Err(Error::email_delivery(message))
        }
        Err(e) => {
            metrics().email_failures.inc();
            metrics().internal_errors.inc();
            health().mailer.set_unhealthy(e.to_string());
            error!(reference = %ctx.reference, error = %e, "Email dispatch failed");
            Err(Error::internal(e.to_string()))
        }
    }
}
