//! Tests for per-client rate limiting through the router.

use api::middleware::rate_limit::RateLimitConfig;
use axum::http::StatusCode;
use integration_tests::{
    fixtures::{self, CONTACT_PATH},
    setup::TestContext,
};

/// Test the sixth submission inside the window is refused
#[tokio::test]
async fn test_sixth_request_returns_429() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let ip = fixtures::client_ip(30);

    for i in 0..5 {
        server
            .post(CONTACT_PATH)
            .add_header("X-Forwarded-For", ip.clone())
            .json(&fixtures::valid_submission())
            .await
            .assert_status_ok();
        assert_eq!(ctx.sent_count(), i + 1);
    }

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", ip.clone())
        .json(&fixtures::valid_submission())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Too many requests. Please try again later.");
    assert!(response.headers().contains_key("retry-after"));
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(ctx.sent_count(), 5, "Rejected request must not dispatch");
}

/// Test clients are limited independently
#[tokio::test]
async fn test_other_client_unaffected() {
    let ctx = TestContext::with_rate_limit(RateLimitConfig {
        max_requests: 1,
        ..RateLimitConfig::default()
    });
    let server = ctx.server();

    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(31))
        .json(&fixtures::valid_submission())
        .await
        .assert_status_ok();
    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(31))
        .json(&fixtures::valid_submission())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", fixtures::client_ip(32))
        .json(&fixtures::valid_submission())
        .await
        .assert_status_ok();
}

/// Test the limiter runs before the honeypot, so bots use up their quota
#[tokio::test]
async fn test_honeypot_hits_count_toward_limit() {
    let ctx = TestContext::with_rate_limit(RateLimitConfig {
        max_requests: 2,
        ..RateLimitConfig::default()
    });
    let server = ctx.server();
    let ip = fixtures::client_ip(33);

    for _ in 0..2 {
        server
            .post(CONTACT_PATH)
            .add_header("X-Forwarded-For", ip.clone())
            .json(&fixtures::bot_submission())
            .await
            .assert_status_ok();
    }

    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", ip.clone())
        .json(&fixtures::valid_submission())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(ctx.sent_count(), 0);
}

/// Test invalid submissions also consume quota
#[tokio::test]
async fn test_invalid_submissions_count_toward_limit() {
    let ctx = TestContext::with_rate_limit(RateLimitConfig {
        max_requests: 1,
        ..RateLimitConfig::default()
    });
    let server = ctx.server();
    let ip = fixtures::client_ip(34);

    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", ip.clone())
        .json(&fixtures::submission_without("message"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", ip)
        .json(&fixtures::valid_submission())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

/// Test X-Real-IP is used when X-Forwarded-For is absent
#[tokio::test]
async fn test_real_ip_header_identifies_client() {
    let ctx = TestContext::with_rate_limit(RateLimitConfig {
        max_requests: 1,
        ..RateLimitConfig::default()
    });
    let server = ctx.server();

    server
        .post(CONTACT_PATH)
        .add_header("X-Real-IP", fixtures::client_ip(35))
        .json(&fixtures::valid_submission())
        .await
        .assert_status_ok();

    let response = server
        .post(CONTACT_PATH)
        .add_header("X-Forwarded-For", format!("{}, 10.0.0.1", fixtures::client_ip(35)))
        .json(&fixtures::valid_submission())
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}
