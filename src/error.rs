//! Error types for the SideShift client library.

use std::time::Duration;

use thiserror::Error;

use crate::http::RequestDescriptor;

/// The main error type for all SideShift client operations.
#[derive(Error, Debug)]
pub enum SideShiftError {
    /// Caller supplied an invalid argument (empty string, bad amount, etc.).
    ///
    /// This is a programmer error and is never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed at the transport layer
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// A single attempt exceeded the configured request timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The API returned a non-success HTTP status
    #[error("{0}")]
    Api(HttpFailure),

    /// The response completed at the HTTP layer but its body could not be
    /// extracted in the expected form (JSON document or raw bytes).
    ///
    /// Signals an integration bug rather than a transient condition and is
    /// never retried.
    #[error("{0}")]
    Shape(HttpFailure),

    /// The retry budget was fully spent on retryable failures.
    ///
    /// Deliberately distinct from the last underlying cause so callers can
    /// tell "gave up" apart from "failed for reason X".
    #[error("max retry timeout exceeded")]
    RetriesExhausted,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

/// Uniform failure payload carrying the full HTTP context of a failed call.
///
/// Built exactly once per failed attempt chain, either by the response
/// handler (HTTP-status failures) or by the request executor (body-shape
/// failures), and carried inside [`SideShiftError::Api`] or
/// [`SideShiftError::Shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    /// Human-readable failure message, e.g. `HTTP 404 Not Found`.
    pub message: String,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Canonical reason phrase for the status, when known.
    pub status_text: Option<String>,
    /// The URL the request was issued against.
    pub url: String,
    /// Snapshot of the request that failed, with secret headers redacted.
    pub request: RequestSummary,
    /// The response body (parsed JSON when possible, raw text otherwise),
    /// preferring a nested `error` field when the API provides one.
    pub cause: Option<serde_json::Value>,
}

impl HttpFailure {
    /// Build a failure payload from a message and the request context.
    ///
    /// Pure construction: copies `status`/`status_text` when a status is
    /// available and always attaches the URL, request snapshot and cause.
    pub fn new(
        message: impl Into<String>,
        status: Option<reqwest::StatusCode>,
        descriptor: &RequestDescriptor,
        cause: Option<serde_json::Value>,
    ) -> Self {
        Self {
            message: message.into(),
            status: status.map(|s| s.as_u16()),
            status_text: status
                .and_then(|s| s.canonical_reason())
                .map(str::to_owned),
            url: descriptor.url.clone(),
            request: RequestSummary::from_descriptor(descriptor),
            cause,
        }
    }
}

impl std::fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

/// Redacted snapshot of a request, attached to failures for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Request headers with secret-bearing values replaced by `[FILTERED]`.
    pub headers: Vec<(String, String)>,
    /// Request body, when one was sent.
    pub body: Option<String>,
}

impl RequestSummary {
    fn from_descriptor(descriptor: &RequestDescriptor) -> Self {
        Self {
            method: descriptor.method.to_string(),
            url: descriptor.url.clone(),
            headers: crate::auth::redact_headers(&descriptor.headers),
            body: descriptor.body.clone(),
        }
    }
}
