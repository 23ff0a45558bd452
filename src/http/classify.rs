//! Retry classification: decides whether a failed attempt is worth retrying.

use crate::error::SideShiftError;

/// Whether a failed attempt may be retried.
///
/// Rules are checked in order; the first match decides:
///
/// 1. transient transport failures (connection reset, connect timeout) retry
/// 2. a timed-out attempt retries
/// 3. programmer errors (bad input, JSON/URL parse, body-shape violations)
///    never retry
/// 4. HTTP 5xx, 403 and 404 are surfaced immediately by policy
/// 5. HTTP 429 (rate limited) always retries
/// 6. everything else does not retry
///
/// Because errors are a tagged union a value belongs to exactly one variant,
/// so a rate-limit status can never shadow a transport failure or vice
/// versa; the ordering above is preserved by the match arms.
pub(crate) fn is_retryable(error: &SideShiftError) -> bool {
    match error {
        SideShiftError::Transport(err) => is_transient_transport(err),
        SideShiftError::Timeout(_) => true,
        SideShiftError::InvalidInput(_)
        | SideShiftError::Json(_)
        | SideShiftError::Url(_)
        | SideShiftError::Shape(_)
        | SideShiftError::RetriesExhausted => false,
        SideShiftError::Api(failure) => match failure.status {
            // Server errors and permanent client errors are terminal.
            Some(status) if status >= 500 || status == 403 || status == 404 => false,
            Some(429) => true,
            _ => false,
        },
    }
}

fn is_transient_transport(error: &reqwest_middleware::Error) -> bool {
    match error {
        reqwest_middleware::Error::Reqwest(err) => {
            if err.is_timeout() || err.is_connect() {
                return true;
            }
            if err.is_builder() || err.is_body() || err.is_decode() {
                return false;
            }
            // Remaining request errors cover mid-flight connection drops.
            err.is_request()
        }
        // Middleware failures carry no transport signal.
        reqwest_middleware::Error::Middleware(_) => false,
    }
}
