//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default number of minutes between reconciliation passes.
pub const INTERVAL_MINUTES: u64 = 60;

/// Default warning log file, relative to the working directory.
pub const LOG_FILE: &str = "ddns-sync.log";

/// Default pass interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_MINUTES * 60)
}
