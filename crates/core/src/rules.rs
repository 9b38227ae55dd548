//! Field rule table shared by the browser validator and the gateway.

use regex::Regex;
use std::sync::LazyLock;

use crate::limits::{MAX_EMAIL_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_SELECTION_LEN};
use crate::sanitize::display_len;

/// Simple `local@domain.tld` shape. Deliverability is the provider's problem.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// An allowed value of a selection field and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

/// Business types offered by the form.
pub const BUSINESS_TYPES: &[SelectOption] = &[
    option("small-business", "Small Business"),
    option("startup", "Startup"),
    option("ecommerce", "E-commerce"),
    option("tech", "Technology"),
    option("professional-services", "Professional Services"),
    option("nonprofit", "Non-profit"),
    option("other", "Other"),
];

/// Services a visitor can ask about.
pub const SERVICE_INTERESTS: &[SelectOption] = &[
    option("admin", "Administrative Support"),
    option("marketing", "Marketing Assistance"),
    option("social-media", "Social Media Management"),
    option("web-design", "Website Design & Maintenance"),
    option("bookkeeping", "Bookkeeping"),
    option("customer-support", "Customer Support"),
    option("other", "Other"),
];

/// How a field is entered, which decides the checks that apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Select,
}

/// The user-editable fields of the contact form.
///
/// The honeypot is deliberately absent: it has no rules, only a tripwire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    BusinessType,
    ServiceInterest,
    Message,
}

impl Field {
    /// Form order, which is also the order errors are focused in.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::BusinessType,
        Field::ServiceInterest,
        Field::Message,
    ];

    /// JSON key on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::BusinessType => "businessType",
            Self::ServiceInterest => "serviceInterest",
            Self::Message => "message",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Name | Self::Message => FieldKind::Text,
            Self::Email => FieldKind::Email,
            Self::BusinessType | Self::ServiceInterest => FieldKind::Select,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::BusinessType)
    }

    pub fn max_len(&self) -> usize {
        match self {
            Self::Name => MAX_NAME_LEN,
            Self::Email => MAX_EMAIL_LEN,
            Self::Message => MAX_MESSAGE_LEN,
            Self::BusinessType | Self::ServiceInterest => MAX_SELECTION_LEN,
        }
    }

    /// Allowed values for selection fields.
    pub fn options(&self) -> Option<&'static [SelectOption]> {
        match self {
            Self::BusinessType => Some(BUSINESS_TYPES),
            Self::ServiceInterest => Some(SERVICE_INTERESTS),
            _ => None,
        }
    }

    /// True when a required field has nothing but whitespace.
    pub fn is_missing(&self, value: &str) -> bool {
        self.is_required() && value.trim().is_empty()
    }

    pub fn exceeds_max_len(&self, value: &str) -> bool {
        display_len(value) > self.max_len()
    }

    /// Membership check for selection fields. An empty optional selection
    /// is accepted; non-selection fields accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        match self.options() {
            Some(options) => {
                (!self.is_required() && value.is_empty())
                    || options.iter().any(|o| o.value == value)
            }
            None => true,
        }
    }

    /// Display label for a selection value, if the value is known.
    pub fn label_for(&self, value: &str) -> Option<&'static str> {
        self.options()?
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
    }
}

/// Pattern check only; length is enforced separately.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}
