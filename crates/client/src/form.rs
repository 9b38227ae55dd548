//! Contact form controller: field feedback, submit gating, result display.

use std::ops::{Deref, DerefMut};

use contact_core::{ContactRequest, Field};
use tracing::{debug, warn};

use crate::check::check_field;
use crate::transport::Transport;
use crate::view::{Banner, FormView};

const DEFAULT_IDLE_LABEL: &str = "Send Message";
const DEFAULT_BUSY_LABEL: &str = "Sending...";

const INVALID_FORM_MESSAGE: &str = "Please correct the errors above and try again.";
const SENT_FALLBACK_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
const ERROR_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again later.";
const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Submit control lifecycle: `Idle -> Submitting -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// How a call to [`ContactForm::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// The gateway accepted the submission.
    Sent { message: String },
    /// The gateway answered with an error status.
    Rejected { status: u16, message: String },
    /// No usable response.
    NetworkError,
}

struct SubmitControl {
    state: SubmitState,
    idle_label: String,
    busy_label: String,
}

/// Holds the control in `Submitting` and puts it back on drop, whether the
/// flow returned, panicked or its future was dropped mid-await.
struct SubmitGuard<'a, V: FormView> {
    view: &'a mut V,
    control: &'a mut SubmitControl,
}

impl<'a, V: FormView> SubmitGuard<'a, V> {
    fn engage(view: &'a mut V, control: &'a mut SubmitControl) -> Self {
        control.state = SubmitState::Submitting;
        view.set_submit_button(false, &control.busy_label);
        Self { view, control }
    }
}

impl<V: FormView> Deref for SubmitGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: FormView> DerefMut for SubmitGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: FormView> Drop for SubmitGuard<'_, V> {
    fn drop(&mut self) {
        self.control.state = SubmitState::Idle;
        self.view.set_submit_button(true, &self.control.idle_label);
    }
}

pub struct ContactForm<V, T> {
    view: V,
    transport: T,
    control: SubmitControl,
}

impl<V: FormView, T: Transport> ContactForm<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self::with_labels(view, transport, DEFAULT_IDLE_LABEL, DEFAULT_BUSY_LABEL)
    }

    pub fn with_labels(
        view: V,
        transport: T,
        idle_label: impl Into<String>,
        busy_label: impl Into<String>,
    ) -> Self {
        Self {
            view,
            transport,
            control: SubmitControl {
                state: SubmitState::Idle,
                idle_label: idle_label.into(),
                busy_label: busy_label.into(),
            },
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn submit_state(&self) -> SubmitState {
        self.control.state
    }

    /// Blur handler. Replaces any previous error on `field` with the result
    /// of a fresh check.
    pub fn validate_field(&mut self, field: Field) -> bool {
        self.view.clear_field_error(field);

        match check_field(field, &self.view.value(field)) {
            Ok(()) => true,
            Err(err) => {
                self.view.show_field_error(field, &err.to_string());
                false
            }
        }
    }

    /// Input handler. Drops a stale error as soon as the user edits.
    pub fn clear_field_error(&mut self, field: Field) {
        self.view.clear_field_error(field);
    }

    /// Checks every field so all errors are marked, then focuses the first
    /// invalid one.
    pub fn validate_form(&mut self) -> bool {
        let mut first_invalid = None;

        for field in Field::ALL {
            if !self.validate_field(field) && first_invalid.is_none() {
                first_invalid = Some(field);
            }
        }

        match first_invalid {
            Some(field) => {
                self.view.focus_field(field);
                false
            }
            None => true,
        }
    }

    /// Submit handler. Taking `&mut self` keeps a second submission from
    /// starting while one is in flight.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.validate_form() {
            self.view.show_banner(Banner::error(INVALID_FORM_MESSAGE));
            return SubmitOutcome::Invalid;
        }

        let payload = self.payload();
        let mut view = SubmitGuard::engage(&mut self.view, &mut self.control);

        match self.transport.send(&payload).await {
            Ok(response) if response.is_success() => {
                let message = response
                    .text("message")
                    .unwrap_or(SENT_FALLBACK_MESSAGE)
                    .to_string();
                view.show_banner(Banner::success(message.clone()));
                view.reset();
                debug!("Contact submission accepted");
                SubmitOutcome::Sent { message }
            }
            Ok(response) => {
                let message = response
                    .text("error")
                    .unwrap_or(ERROR_FALLBACK_MESSAGE)
                    .to_string();
                view.show_banner(Banner::error(message.clone()));
                debug!(status = response.status, "Contact submission rejected");
                SubmitOutcome::Rejected {
                    status: response.status,
                    message,
                }
            }
            Err(err) => {
                warn!(error = %err, "Contact submission failed");
                view.show_banner(Banner::error(NETWORK_ERROR_MESSAGE));
                SubmitOutcome::NetworkError
            }
        }
    }

    /// Trimmed field values plus the honeypot exactly as found.
    fn payload(&self) -> ContactRequest {
        let value = |field: Field| self.view.value(field).trim().to_string();

        ContactRequest {
            name: value(Field::Name),
            email: value(Field::Email),
            business_type: value(Field::BusinessType),
            service_interest: value(Field::ServiceInterest),
            message: value(Field::Message),
            company_name: self.view.honeypot().unwrap_or_default(),
        }
    }
}
