//! Per-client sliding-window rate limiting.

use contact_core::limits::{
    RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_SWEEP_INTERVAL_SECS, RATE_LIMIT_WINDOW_SECS,
};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Admitted requests per client per window
    #[validate(range(min = 1))]
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    /// Window length in seconds
    #[validate(range(min = 1))]
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// How often idle clients are dropped from the table
    #[validate(range(min = 1))]
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_max_requests() -> usize {
    RATE_LIMIT_MAX_REQUESTS
}

fn default_window_secs() -> u64 {
    RATE_LIMIT_WINDOW_SECS
}

fn default_sweep_interval_secs() -> u64 {
    RATE_LIMIT_SWEEP_INTERVAL_SECS
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Recorded; `remaining` more requests fit in the current window.
    Admitted { remaining: usize },
    /// Nothing recorded. The oldest request leaves the window after `retry_after`.
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

/// Request timestamps per client identifier.
///
/// Each key's check-and-record runs under that key's shard lock, so two
/// concurrent requests from one client cannot both take the last slot.
pub struct RateLimiter {
    windows: DashMap<String, Vec<Instant>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn check(&self, key: &str) -> Admission {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Admission {
        let window = self.config.window();
        let mut entry = self.windows.entry(key.to_string()).or_default();
        let stamps = entry.value_mut();

        prune(stamps, now, window);

        if stamps.len() < self.config.max_requests {
            stamps.push(now);
            return Admission::Admitted {
                remaining: self.config.max_requests - stamps.len(),
            };
        }

        let retry_after = stamps
            .iter()
            .min()
            .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
            .unwrap_or(window);

        Admission::Rejected { retry_after }
    }

    /// Drop expired timestamps and forget clients with none left.
    /// Returns how many clients were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let window = self.config.window();
        let before = self.windows.len();

        self.windows.retain(|_, stamps| {
            prune(stamps, now, window);
            !stamps.is_empty()
        });

        before.saturating_sub(self.windows.len())
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

fn prune(stamps: &mut Vec<Instant>, now: Instant, window: Duration) {
    stamps.retain(|ts| now.saturating_duration_since(*ts) < window);
}

/// Shared rate limiter state.
pub type SharedRateLimiter = Arc<RateLimiter>;
