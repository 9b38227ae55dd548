//! Client-side contact form controller.
//!
//! Front-ends implement [`FormView`] over their widgets (DOM, native UI, a
//! test double) and hand it to [`ContactForm`] together with a
//! [`Transport`]. Field rules come from `contact_core::rules`, the same table
//! the gateway enforces.

pub mod check;
pub mod form;
pub mod transport;
pub mod view;

pub use check::{check_field, FieldError};
pub use form::{ContactForm, SubmitOutcome, SubmitState};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use view::{Banner, BannerKind, FormView};
