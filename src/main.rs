//! Contact submission gateway.
//!
//! Accepts contact form posts, screens them (method, rate limit, honeypot,
//! sanitization, validation) and forwards accepted submissions as an HTML
//! email through the configured provider.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use validator::Validate;

use api::{middleware::rate_limit::RateLimitConfig, router, AppState};
use mailer::{MailerConfig, API_KEY_ENV};
use telemetry::init_tracing_from_env;

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Validate)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Origin allowed to call the gateway from a browser
    #[validate(url)]
    #[serde(default = "default_allowed_origin")]
    allowed_origin: String,

    #[validate(nested)]
    #[serde(default)]
    rate_limit: RateLimitConfig,

    #[validate(nested)]
    #[serde(default)]
    mailer: MailerConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origin() -> String {
    "https://example.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            rate_limit: RateLimitConfig::default(),
            mailer: MailerConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting contact gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(
        allowed_origin = %config.allowed_origin,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        recipient = %config.mailer.to,
        "Loaded configuration"
    );

    // The credential is only ever read from the environment.
    let api_key = std::env::var(API_KEY_ENV).ok();

    let state = AppState::from_api_key(
        api_key,
        config.mailer.clone(),
        &config.allowed_origin,
        config.rate_limit.clone(),
    )
    .context("Failed to build application state")?;

    let _rate_limiter_cleanup = state.start_rate_limiter_cleanup();
    info!(
        interval_secs = config.rate_limit.sweep_interval_secs,
        "Started rate limiter sweep task"
    );

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Peer addresses feed client identification when no proxy header is set.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from defaults, `config/default.toml` and `CONTACT__*`
/// environment variables, in that order.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("CONTACT")
                .prefix_separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
