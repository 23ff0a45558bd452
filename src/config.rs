//! Request-layer configuration.

use std::time::Duration;

/// Base URL for the SideShift REST API v2.
pub const SIDESHIFT_BASE_URL: &str = "https://sideshift.ai/api/v2";

/// Settings consulted by every request issued through the client.
///
/// Built once at client construction and immutable afterwards: each request
/// chain reads it, none writes it, so concurrent calls need no locking.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Initial delay between retries.
    pub retry_delay: Duration,
    /// Exponential backoff multiplier applied per attempt.
    pub retry_backoff: f64,
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Upper bound on the delay between retries.
    pub retry_capped_delay: Duration,
    /// Per-attempt timeout; an attempt still in flight when it elapses is
    /// cancelled and treated as a timeout failure.
    pub timeout: Duration,
    /// Emit a structured debug dump of every request.
    pub verbose: bool,
    /// Base URL for all API endpoints.
    pub base_url: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_millis(2000),
            retry_backoff: 2.0,
            max_retries: 5,
            retry_capped_delay: Duration::from_millis(10_000),
            timeout: Duration::from_millis(10_000),
            verbose: false,
            base_url: SIDESHIFT_BASE_URL.to_string(),
        }
    }
}
