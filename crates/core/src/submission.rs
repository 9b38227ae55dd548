//! Contact submission as received, sanitized and validated.
//!
//! The three stages are distinct types so a submission cannot reach the
//! mailer without passing through [`ContactRequest::sanitize`] and
//! [`crate::validation::validate`].

use serde::{Deserialize, Serialize};

use crate::rules::Field;
use crate::sanitize::sanitize;

/// Label used when the optional business type was left empty.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Contact form payload (camelCase on the wire, honeypot in snake_case).
///
/// Missing keys deserialize as empty strings so absence and blankness are
/// handled by the same rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub business_type: String,
    pub service_interest: String,
    pub message: String,
    /// Honeypot. Hidden from people, filled in by form-stuffing bots.
    #[serde(rename = "company_name")]
    pub company_name: String,
}

impl ContactRequest {
    /// Parses a JSON request body.
    pub fn from_json(bytes: &[u8]) -> crate::Result<Self> {
        serde_json::from_slice(bytes).map_err(crate::Error::from)
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::BusinessType => &self.business_type,
            Field::ServiceInterest => &self.service_interest,
            Field::Message => &self.message,
        }
    }

    /// True when the honeypot carries anything but whitespace.
    pub fn is_automated(&self) -> bool {
        !self.company_name.trim().is_empty()
    }

    /// Trims, truncates and escapes every field independently.
    pub fn sanitize(&self) -> SanitizedSubmission {
        let clean = |field: Field| sanitize(self.value(field).trim(), field.max_len());

        SanitizedSubmission {
            name: clean(Field::Name),
            email: clean(Field::Email),
            business_type: clean(Field::BusinessType),
            service_interest: clean(Field::ServiceInterest),
            message: clean(Field::Message),
        }
    }
}

/// A submission whose fields are safe to embed in HTML but not yet checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSubmission {
    name: String,
    email: String,
    business_type: String,
    service_interest: String,
    message: String,
}

impl SanitizedSubmission {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::BusinessType => &self.business_type,
            Field::ServiceInterest => &self.service_interest,
            Field::Message => &self.message,
        }
    }
}

/// A sanitized submission that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission(SanitizedSubmission);

impl ValidSubmission {
    pub(crate) fn from_checked(submission: SanitizedSubmission) -> Self {
        Self(submission)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn business_type(&self) -> &str {
        &self.0.business_type
    }

    pub fn service_interest(&self) -> &str {
        &self.0.service_interest
    }

    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// Human label for the business type, falling back to the raw value.
    pub fn business_type_label(&self) -> &str {
        if self.0.business_type.is_empty() {
            return NOT_SPECIFIED;
        }
        Field::BusinessType
            .label_for(&self.0.business_type)
            .unwrap_or(&self.0.business_type)
    }

    /// Human label for the service interest, falling back to the raw value.
    pub fn service_interest_label(&self) -> &str {
        Field::ServiceInterest
            .label_for(&self.0.service_interest)
            .unwrap_or(&self.0.service_interest)
    }
}
