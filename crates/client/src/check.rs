//! Per-field checks run on blur and again at submit time.

use contact_core::rules::{is_valid_email, Field, FieldKind};
use thiserror::Error;

/// Recoverable field errors. Display text goes into the field's error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    RequiredFieldMissing,

    #[error("Please enter a valid email address")]
    InvalidEmailFormat,

    #[error("Please select an option")]
    NoOptionSelected,
}

pub fn check_field(field: Field, value: &str) -> Result<(), FieldError> {
    if field.is_missing(value) {
        return Err(match field.kind() {
            FieldKind::Select => FieldError::NoOptionSelected,
            FieldKind::Text | FieldKind::Email => FieldError::RequiredFieldMissing,
        });
    }

    let value = value.trim();
    if field.kind() == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        return Err(FieldError::InvalidEmailFormat);
    }

    Ok(())
}
