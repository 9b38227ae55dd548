//! API routes.

pub mod contact;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use contact_core::{limits::MAX_BODY_BYTES, Error};
use std::any::Any;
use telemetry::metrics;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

use crate::middleware::security_headers::security_headers;
use crate::response::ApiError;
use crate::state::AppState;

/// Path the contact form posts to.
pub const CONTACT_PATH: &str = "/api/contact";

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let allowed_origin = state.allowed_origin.clone();

    Router::new()
        .route(CONTACT_PATH, any(contact::contact_handler))
        .route("/health", get(health::health_handler))
        .route("/health/live", get(health::live_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            allowed_origin,
            security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turns a handler panic into the generic internal error response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    metrics().internal_errors.inc();
    error!(panic = %detail, "Request handler panicked");

    ApiError::from(Error::internal(detail)).into_response()
}
