//! What the form controller needs from the UI.

use contact_core::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Form-level status message shown above or below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Widget access for [`crate::ContactForm`].
///
/// A DOM implementation marks a field by changing its border color and
/// writing into the error element next to it.
pub trait FormView: Send {
    /// Current raw value of a field.
    fn value(&self, field: Field) -> String;

    /// Value of the hidden honeypot input, `None` if the page has none.
    fn honeypot(&self) -> Option<String>;

    fn show_field_error(&mut self, field: Field, message: &str);

    fn clear_field_error(&mut self, field: Field);

    /// Scroll the field into view and give it focus.
    fn focus_field(&mut self, field: Field);

    fn show_banner(&mut self, banner: Banner);

    fn set_submit_button(&mut self, enabled: bool, label: &str);

    /// Clear every input back to its initial value.
    fn reset(&mut self);
}
