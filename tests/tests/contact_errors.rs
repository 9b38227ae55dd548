//! Tests for rejected submissions.
//!
//! These verify status codes, the `{ "error": ... }` body and that nothing
//! is dispatched when a step fails.

use axum::http::StatusCode;
use integration_tests::{
    fixtures::{self, CONTACT_PATH},
    mocks::MailerBehavior,
    setup::{TestContext, TEST_ORIGIN},
};

fn error_of(response: &axum_test::TestResponse) -> String {
    let body: serde_json::Value = response.json();
    body["error"].as_str().unwrap_or_default().to_string()
}

/// Test GET is refused before the limiter sees the request
#[tokio::test]
async fn test_get_returns_405_without_rate_limit() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(10))
        .await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_of(&response), "Method not allowed");
    assert_eq!(ctx.state.rate_limiter.tracked_clients(), 0);
    assert_eq!(response.header("x-frame-options"), "DENY");
}

/// Test missing credential refuses every submission
#[tokio::test]
async fn test_missing_credential_returns_500() {
    let ctx = TestContext::misconfigured();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(11))
        .json(&fixtures::valid_submission())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_of(&response), "Server configuration error");
    assert_eq!(ctx.state.rate_limiter.tracked_clients(), 0);
    assert_eq!(response.header("access-control-allow-origin"), TEST_ORIGIN);
    assert_eq!(response.header("access-control-allow-credentials"), "true");
}

/// Test a missing required field
#[tokio::test]
async fn test_missing_message_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(12))
        .json(&fixtures::submission_without("message"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&response), "Please fill in all required fields");
    assert_eq!(ctx.sent_count(), 0);
}

/// Test whitespace-only counts as missing
#[tokio::test]
async fn test_blank_name_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(13))
        .json(&fixtures::submission_with("name", "   "))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&response), "Please fill in all required fields");
}

/// Test an unknown service interest
#[tokio::test]
async fn test_bogus_service_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(14))
        .json(&fixtures::submission_with("serviceInterest", "bogus"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&response), "Invalid selection for service interest");
    assert_eq!(ctx.sent_count(), 0);
}

/// Test an unknown business type
#[tokio::test]
async fn test_bogus_business_type_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(15))
        .json(&fixtures::submission_with("businessType", "enterprise"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&response), "Invalid selection for business type");
}

/// Test the email shape check
#[tokio::test]
async fn test_invalid_email_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(16))
        .json(&fixtures::submission_with("email", "jo@localhost"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&response), "Please enter a valid email address");
}

/// Test over-long input is truncated rather than rejected
#[tokio::test]
async fn test_long_message_is_truncated() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(17))
        .json(&fixtures::submission_with("message", "a".repeat(2500)))
        .await;

    response.assert_status_ok();
    let html = &ctx.sent_emails()[0].html;
    assert!(html.contains(&"a".repeat(2000)));
    assert!(!html.contains(&"a".repeat(2001)));
}

/// Test body that is not JSON
#[tokio::test]
async fn test_malformed_body_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(18))
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&response), "Invalid request body");
}

/// Test provider refusal maps to 400 with a generic message
#[tokio::test]
async fn test_provider_rejection_returns_400() {
    let ctx = TestContext::new();
    ctx.set_mailer_behavior(MailerBehavior::Reject {
        status: 403,
        message: "The example.com domain is not verified".into(),
    });
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(19))
        .json(&fixtures::valid_submission())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response),
        "Failed to send email. Please try again later."
    );
    assert!(!response.text().contains("domain"));
}

/// Test an unreachable provider maps to 500
#[tokio::test]
async fn test_provider_unreachable_returns_500() {
    let ctx = TestContext::new();
    ctx.set_mailer_behavior(MailerBehavior::Unreachable);
    let server = ctx.server();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(20))
        .json(&fixtures::valid_submission())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_of(&response), "Internal server error");
    assert!(!response.text().contains("connection refused"));
}
