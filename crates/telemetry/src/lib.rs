//! Telemetry for the contact gateway.
//!
//! Logs go through `tracing`; counters and health stay in-process and are
//! exposed on the gateway's health route.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
