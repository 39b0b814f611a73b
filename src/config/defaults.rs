//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Base URL of the ResMan partner API.
pub const BASE_URL: &str = "https://partners-api.myresman.com";

/// Default per-attempt request timeout in milliseconds.
pub const TIMEOUT_MS: u64 = 30_000;

/// Header carrying the ResMan account id.
pub const ACCOUNT_ID_HEADER: &str = "ResMan-Account-Id";

/// Default per-attempt request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_millis(TIMEOUT_MS)
}
