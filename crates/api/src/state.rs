//! Application state shared across handlers.

use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter, SharedRateLimiter};
use axum::http::HeaderValue;
use contact_core::Error;
use mailer::{EmailSender, MailerConfig, ResendClient, API_KEY_ENV};
use std::sync::Arc;
use telemetry::health;
use tracing::{debug, info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Email provider. `None` when no credential was configured, in which
    /// case every submission is refused with a configuration error.
    pub mailer: Option<Arc<dyn EmailSender>>,
    /// Sender, recipient and subject settings
    pub mail: Arc<MailerConfig>,
    /// Per-client limiter
    pub rate_limiter: SharedRateLimiter,
    /// Value of `Access-Control-Allow-Origin`
    pub allowed_origin: HeaderValue,
}

impl AppState {
    pub fn new(
        mailer: Option<Arc<dyn EmailSender>>,
        mail: MailerConfig,
        allowed_origin: &str,
        rate_config: RateLimitConfig,
    ) -> Result<Self, Error> {
        let allowed_origin = HeaderValue::from_str(allowed_origin).map_err(|_| {
            Error::misconfigured(format!("invalid allowed origin: {allowed_origin:?}"))
        })?;

        match &mailer {
            Some(_) => health().mailer.set_healthy(),
            None => health()
                .mailer
                .set_unhealthy(format!("{API_KEY_ENV} is not set")),
        }

        Ok(Self {
            mailer,
            mail: Arc::new(mail),
            rate_limiter: Arc::new(RateLimiter::new(rate_config)),
            allowed_origin,
        })
    }

    /// Build the provider client from `api_key`, or run without one.
    ///
    /// A missing or blank key still yields a serving state; submissions then
    /// fail with a configuration error instead of the process refusing to start.
    pub fn from_api_key(
        api_key: Option<String>,
        mail: MailerConfig,
        allowed_origin: &str,
        rate_config: RateLimitConfig,
    ) -> Result<Self, Error> {
        let mailer: Option<Arc<dyn EmailSender>> =
            match api_key.filter(|key| !key.trim().is_empty()) {
                Some(key) => {
                    let client = ResendClient::new(&mail, key)
                        .map_err(|e| Error::misconfigured(e.to_string()))?;
                    info!(endpoint = %mail.emails_endpoint(), "Email provider configured");
                    Some(Arc::new(client))
                }
                None => {
                    warn!("{} is not set; submissions will be refused", API_KEY_ENV);
                    None
                }
            };

        Self::new(mailer, mail, allowed_origin, rate_config)
    }

    /// Start the rate limiter sweep background task.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_rate_limiter_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let rate_limiter = self.rate_limiter.clone();
        let period = rate_limiter.config().sweep_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = rate_limiter.sweep();
                debug!(
                    removed,
                    remaining = rate_limiter.tracked_clients(),
                    "Rate limiter sweep"
                );
            }
        })
    }
}
