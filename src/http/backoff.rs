//! Exponential backoff with jitter for the retry loop.

use std::time::Duration;

use rand::Rng;

use crate::config::RequestConfig;

/// Compute the delay before the next retry attempt.
///
/// For attempts within the budget the delay grows exponentially
/// (`multiplier^attempt * base_delay`), is capped at `capped_delay`, and
/// gets up to 20% random jitter on top to avoid thundering-herd retries.
/// At or past the budget the cap itself is returned, with no jitter.
///
/// The result is always finite and non-negative.
pub(crate) fn compute_delay(
    attempt: u32,
    base_delay: Duration,
    multiplier: f64,
    max_retries: u32,
    capped_delay: Duration,
) -> Duration {
    if attempt >= max_retries {
        return capped_delay;
    }

    let cap_ms = capped_delay.as_millis() as f64;
    let raw = multiplier.powi(attempt as i32) * base_delay.as_millis() as f64;
    // f64::min/max also absorb a NaN from degenerate multiplier values.
    let capped = raw.min(cap_ms).max(0.0);
    let jitter = rand::rng().random_range(0.0..=capped * 0.2);
    Duration::from_millis((capped + jitter) as u64)
}

/// [`compute_delay`] fed from a [`RequestConfig`].
pub(crate) fn delay_for(attempt: u32, config: &RequestConfig) -> Duration {
    compute_delay(
        attempt,
        config.retry_delay,
        config.retry_backoff,
        config.max_retries,
        config.retry_capped_delay,
    )
}
