//! Size and abuse limits for the contact pipeline.
//!
//! Field limits are counted in characters, where an HTML entity produced by
//! sanitization counts as the single character it encodes.

// === Field Limits (chars) ===

/// Submitter name max length.
pub const MAX_NAME_LEN: usize = 100;

/// Email address max length (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Free-text message max length.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Selection values are short slugs; anything longer is garbage.
pub const MAX_SELECTION_LEN: usize = 50;

// === Request Limits ===

/// Maximum request body size in bytes (64KB).
///
/// A maxed-out submission is a little over 2KB of text before JSON overhead.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// === Rate Limiting ===

/// Accepted submissions per client inside one window.
pub const RATE_LIMIT_MAX_REQUESTS: usize = 5;

/// Trailing window length (15 minutes).
pub const RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

/// Interval between sweeps of idle clients (1 hour).
pub const RATE_LIMIT_SWEEP_INTERVAL_SECS: u64 = 60 * 60;
