//! Health state for the gateway's dependencies.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health of one external dependency.
#[derive(Debug)]
pub struct ComponentHealth {
    name: &'static str,
    healthy: AtomicBool,
    message: parking_lot::RwLock<Option<String>>,
}

impl ComponentHealth {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            healthy: AtomicBool::new(false),
            message: parking_lot::RwLock::new(None),
        }
    }

    pub fn set_healthy(&self) {
        self.healthy.store(true, Ordering::Relaxed);
        *self.message.write() = None;
    }

    pub fn set_unhealthy(&self, msg: impl Into<String>) {
        self.healthy.store(false, Ordering::Relaxed);
        *self.message.write() = Some(msg.into());
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> ComponentHealthReport {
        ComponentHealthReport {
            name: self.name,
            healthy: self.is_healthy(),
            message: self.message.read().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealthReport {
    pub name: &'static str,
    pub healthy: bool,
    pub message: Option<String>,
}

/// Aggregated health status.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub components: Vec<ComponentHealthReport>,
}

/// Dependencies the gateway reports on.
///
/// The mailer is marked healthy at startup when a credential is present and
/// flips on each delivery outcome afterwards.
pub struct HealthRegistry {
    pub mailer: ComponentHealth,
}

impl HealthRegistry {
    pub const fn new() -> Self {
        Self {
            mailer: ComponentHealth::new("mailer"),
        }
    }

    pub fn report(&self) -> HealthReport {
        let mailer = self.mailer.report();

        // The form still rejects spam and validates input without a mailer,
        // so a broken mailer degrades rather than kills the service.
        let status = if mailer.healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        HealthReport {
            status,
            components: vec![mailer],
        }
    }

    /// The process is up if it can answer.
    pub fn is_alive(&self) -> bool {
        true
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global health registry.
pub static HEALTH: std::sync::LazyLock<HealthRegistry> =
    std::sync::LazyLock::new(HealthRegistry::new);

/// Get the global health registry.
pub fn health() -> &'static HealthRegistry {
    &HEALTH
}
