//! Submission-level validation as performed at the trust boundary.

use thiserror::Error;

use crate::rules::{is_valid_email, Field};
use crate::submission::{SanitizedSubmission, ValidSubmission};

/// The first rule a submission broke. Display text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Invalid request body")]
    MalformedBody,

    #[error("Please fill in all required fields")]
    MissingRequired,

    #[error("Name must be 100 characters or less")]
    NameTooLong,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message must be 2000 characters or less")]
    MessageTooLong,

    #[error("Invalid selection for business type")]
    InvalidBusinessType,

    #[error("Invalid selection for service interest")]
    InvalidServiceInterest,
}

/// Checks rules in a fixed order and reports only the first violation:
/// presence, name length, email format, message length, business type,
/// service interest.
pub fn validate(submission: SanitizedSubmission) -> Result<ValidSubmission, ValidationFailure> {
    let missing = Field::ALL
        .iter()
        .any(|field| field.is_missing(submission.value(*field)));
    if missing {
        return Err(ValidationFailure::MissingRequired);
    }

    if Field::Name.exceeds_max_len(submission.value(Field::Name)) {
        return Err(ValidationFailure::NameTooLong);
    }

    let email = submission.value(Field::Email);
    if !is_valid_email(email) || Field::Email.exceeds_max_len(email) {
        return Err(ValidationFailure::InvalidEmail);
    }

    if Field::Message.exceeds_max_len(submission.value(Field::Message)) {
        return Err(ValidationFailure::MessageTooLong);
    }

    if !Field::BusinessType.accepts(submission.value(Field::BusinessType)) {
        return Err(ValidationFailure::InvalidBusinessType);
    }

    if !Field::ServiceInterest.accepts(submission.value(Field::ServiceInterest)) {
        return Err(ValidationFailure::InvalidServiceInterest);
    }

    Ok(ValidSubmission::from_checked(submission))
}
