//! Response inspection: passthrough on success, normalized error otherwise.

use reqwest::Response;
use tracing::debug;

use super::RequestDescriptor;
use crate::error::{HttpFailure, SideShiftError};

/// Substituted when the error body can be neither parsed nor read.
const FALLBACK_ERROR_BODY: &str = "Failed to parse error details";

/// Inspect a response before payload extraction.
///
/// On a success status the response is returned untouched so the caller can
/// still read the body stream exactly once. On a failure status the body is
/// drained (JSON if it parses, raw text otherwise, a fixed fallback if even
/// that fails) and raised as [`SideShiftError::Api`].
///
/// In verbose mode a structured dump of the request is emitted first, with
/// secret-bearing header values redacted.
pub(crate) async fn handle_response(
    response: Response,
    descriptor: &RequestDescriptor,
    verbose: bool,
) -> Result<Response, SideShiftError> {
    if verbose {
        debug!(
            method = %descriptor.method,
            url = %descriptor.url,
            headers = ?crate::auth::redact_headers(&descriptor.headers),
            body = descriptor.body.as_deref().unwrap_or("No body"),
            "request"
        );
    }

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let cause = match response.text().await {
        Ok(text) => extract_cause(&text),
        Err(_) => serde_json::json!({ "message": FALLBACK_ERROR_BODY }),
    };

    let message = match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    };

    Err(SideShiftError::Api(HttpFailure::new(
        message,
        Some(status),
        descriptor,
        Some(cause),
    )))
}

/// Pick the most useful error payload out of a failure body.
///
/// Prefers the nested `error` field SideShift uses for structured errors,
/// falls back to the whole JSON document, then to the raw text.
fn extract_cause(text: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(body) => match body.get("error") {
            Some(error) => error.clone(),
            None => body,
        },
        Err(_) => serde_json::Value::String(text.to_string()),
    }
}
