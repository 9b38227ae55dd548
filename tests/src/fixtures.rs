//! Request bodies and client addresses.

use serde_json::{json, Value};

pub const CONTACT_PATH: &str = "/api/contact";

/// A submission that passes every check.
pub fn valid_submission() -> Value {
    json!({
        "name": "Jo Smith",
        "email": "jo@x.com",
        "businessType": "startup",
        "serviceInterest": "admin",
        "message": "Hi, we need help with our inbox.",
        "company_name": ""
    })
}

/// [`valid_submission`] with one key replaced.
pub fn submission_with(key: &str, value: impl Into<Value>) -> Value {
    let mut body = valid_submission();
    body[key] = value.into();
    body
}

/// [`valid_submission`] with one key removed.
pub fn submission_without(key: &str) -> Value {
    let mut body = valid_submission();
    if let Some(map) = body.as_object_mut() {
        map.remove(key);
    }
    body
}

/// A submission whose honeypot was filled in.
pub fn bot_submission() -> Value {
    submission_with("company_name", "Acme Bots LLC")
}

/// Distinct client address per test so limiter state never overlaps.
pub fn client_ip(n: u8) -> String {
    format!("203.0.113.{n}")
}
