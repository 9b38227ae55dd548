//! In-process submission metrics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Latency histogram with fixed millisecond buckets.
#[derive(Debug)]
pub struct Histogram {
    /// Upper bounds: 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s, +inf
    buckets: [AtomicU64; 9],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    // Provider round trips dominate, so buckets start where a fast API call ends.
    const BUCKET_BOUNDS: [u64; 8] = [50, 100, 250, 500, 1000, 2500, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len());
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        match self.count() {
            0 => 0.0,
            n => self.sum.load(Ordering::Relaxed) as f64 / n as f64,
        }
    }

    /// Bucket counts keyed by upper bound; `None` is the overflow bucket.
    pub fn buckets(&self) -> Vec<(Option<u64>, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .map(|&b| Some(b))
            .chain(std::iter::once(None))
            .zip(self.buckets.iter())
            .map(|(bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Counters for every branch of the submission pipeline.
#[derive(Debug, Default)]
pub struct Metrics {
    pub submissions_received: Counter,
    pub method_rejected: Counter,
    pub rate_limited: Counter,
    pub honeypot_caught: Counter,
    pub validation_failed: Counter,
    pub emails_sent: Counter,
    pub email_failures: Counter,
    pub internal_errors: Counter,

    pub dispatch_latency_ms: Histogram,
}

/// Point-in-time view of [`Metrics`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub submissions_received: u64,
    pub method_rejected: u64,
    pub rate_limited: u64,
    pub honeypot_caught: u64,
    pub validation_failed: u64,
    pub emails_sent: u64,
    pub email_failures: u64,
    pub internal_errors: u64,
    pub dispatch_latency_mean_ms: f64,
}

impl Metrics {
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            submissions_received: self.submissions_received.get(),
            method_rejected: self.method_rejected.get(),
            rate_limited: self.rate_limited.get(),
            honeypot_caught: self.honeypot_caught.get(),
            validation_failed: self.validation_failed.get(),
            emails_sent: self.emails_sent.get(),
            email_failures: self.email_failures.get(),
            internal_errors: self.internal_errors.get(),
            dispatch_latency_mean_ms: self.dispatch_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::default);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
