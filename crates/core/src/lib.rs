//! Core types, shared validation rules and sanitization for the contact
//! submission pipeline.
//!
//! The rule table in [`rules`] is the single source of truth for field
//! requirements. The browser-side validator applies it per field; the
//! gateway applies it per submission after [`sanitize`].

pub mod error;
pub mod limits;
pub mod rules;
pub mod sanitize;
pub mod submission;
pub mod validation;

pub use error::{Error, ErrorCode, Result};
pub use rules::{Field, FieldKind, SelectOption};
pub use sanitize::{display_len, sanitize};
pub use submission::{ContactRequest, SanitizedSubmission, ValidSubmission};
pub use validation::{validate, ValidationFailure};
