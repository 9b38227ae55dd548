//! End-to-end tests for accepted submissions.
//!
//! Each test drives the real router with the mock mailer standing in for the
//! email provider.

use axum::http::{Method, StatusCode};
use integration_tests::{
    fixtures::{self, CONTACT_PATH},
    setup::{TestContext, TEST_ORIGIN},
};

const SUCCESS: &str = "Thank you! Your message has been sent successfully.";

/// Test a valid submission is accepted and dispatched once
#[tokio::test]
async fn test_valid_submission_sends_one_email() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(1))
        .json(&fixtures::valid_submission())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], SUCCESS);

    let sent = ctx.sent_emails();
    assert_eq!(sent.len(), 1, "Expected exactly one dispatch");

    let email = &sent[0];
    assert_eq!(email.to, vec!["hello@example.com".to_string()]);
    assert_eq!(email.reply_to, "jo@x.com");
    assert_eq!(email.from, "Website Contact Form <noreply@example.com>");
    assert_eq!(email.subject, "New Contact Form Submission from Jo Smith");
    assert!(email.html.contains("Startup"));
    assert!(email.html.contains("Administrative Support"));
    assert!(email.html.contains("203.0.113.1"));
}

/// Test a filled honeypot gets the same success body and sends nothing
#[tokio::test]
async fn test_honeypot_fakes_success() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let real = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(2))
        .json(&fixtures::valid_submission())
        .await;
    let bot = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(3))
        .json(&fixtures::bot_submission())
        .await;

    bot.assert_status_ok();
    assert_eq!(bot.text(), real.text(), "Bot must not be able to tell");
    assert_eq!(ctx.sent_count(), 1, "Only the real submission is sent");
}

/// Test markup in any field reaches the email escaped
#[tokio::test]
async fn test_markup_is_escaped_in_email() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let payload = fixtures::submission_with("message", "<script>alert(1)</script>\nThanks");
    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(4))
        .json(&payload)
        .await;

    response.assert_status_ok();
    let html = &ctx.sent_emails()[0].html;
    assert!(html.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;<br>Thanks"));
    assert!(!html.contains("<script>"));
}

/// Test the optional business type may be omitted
#[tokio::test]
async fn test_missing_business_type_is_not_specified() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(5))
        .json(&fixtures::submission_without("businessType"))
        .await;

    response.assert_status_ok();
    assert!(ctx.sent_emails()[0].html.contains("Not specified"));
}

/// Test surrounding whitespace is trimmed before the email is built
#[tokio::test]
async fn test_fields_are_trimmed() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let payload = fixtures::submission_with("email", "  jo@x.com  ");
    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(6))
        .json(&payload)
        .await
        .assert_status_ok();

    assert_eq!(ctx.sent_emails()[0].reply_to, "jo@x.com");
}

/// Test the CORS preflight is answered with the header set
#[tokio::test]
async fn test_options_preflight() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.method(Method::OPTIONS, CONTACT_PATH).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), TEST_ORIGIN);
    assert_eq!(
        response.header("access-control-allow-methods"),
        "POST, OPTIONS"
    );
    assert_eq!(
        response.header("access-control-allow-headers"),
        "Content-Type"
    );
    assert_eq!(response.header("access-control-allow-credentials"), "true");
    assert_eq!(ctx.sent_count(), 0);
    assert_eq!(ctx.state.rate_limiter.tracked_clients(), 0);
}

/// Test security headers are on success responses too
#[tokio::test]
async fn test_security_headers_on_success() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(7))
        .json(&fixtures::valid_submission())
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("x-xss-protection"), "1; mode=block");
    assert_eq!(response.header("access-control-allow-credentials"), "true");
    assert_eq!(response.header("access-control-allow-origin"), TEST_ORIGIN);
}
