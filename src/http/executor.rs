//! The request executor: timeout-bounded dispatch plus the retry loop.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use tracing::warn;

use super::{RequestDescriptor, backoff, classify, response};
use crate::config::RequestConfig;
use crate::endpoints;
use crate::error::{HttpFailure, SideShiftError};

/// Issues HTTP calls for the client and applies the retry policy.
///
/// Attempts within one logical call are strictly sequential: attempt N+1
/// starts only after attempt N's failure has been classified and the
/// computed backoff delay has elapsed. Each attempt owns its own timeout;
/// cancelling one attempt never affects the next.
pub(crate) struct HttpExecutor {
    http: ClientWithMiddleware,
    config: Arc<RequestConfig>,
}

/// What the retry loop decided to do with a failed attempt.
enum RetryDecision {
    /// Surface the error as-is: non-retryable, or the method is exempt.
    Surface,
    /// Budget spent on a retryable failure: raise the fixed exhaustion error.
    GiveUp,
    /// Wait this long, then run the next attempt.
    Retry(Duration),
}

impl HttpExecutor {
    pub(crate) fn new(http: ClientWithMiddleware, config: Arc<RequestConfig>) -> Self {
        Self { http, config }
    }

    pub(crate) fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Execute a request and deserialize the JSON response body.
    ///
    /// POST requests are never retried: a state-changing call that failed in
    /// flight may still have reached the server, and silently repeating it
    /// could duplicate the side effect. Idempotent reads retry per policy.
    pub(crate) async fn execute_json<T>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, SideShiftError>
    where
        T: serde::de::DeserializeOwned,
    {
        ensure_url(descriptor)?;
        let retry_allowed = descriptor.method != Method::POST;

        let mut attempt: u32 = 0;
        loop {
            let error = match self.attempt_json(descriptor).await {
                Ok(value) => return Ok(serde_json::from_value(value)?),
                Err(error) => error,
            };

            match self.retry_decision(&error, attempt, retry_allowed) {
                RetryDecision::Surface => return Err(error),
                RetryDecision::GiveUp => return Err(SideShiftError::RetriesExhausted),
                RetryDecision::Retry(delay) => {
                    warn!(
                        url = %descriptor.url,
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Execute a request and return the raw response bytes.
    ///
    /// Used for icon lookups, which are always GET-shaped, so retries apply
    /// regardless of method.
    pub(crate) async fn execute_bytes(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Vec<u8>, SideShiftError> {
        ensure_url(descriptor)?;

        let mut attempt: u32 = 0;
        loop {
            let error = match self.attempt_bytes(descriptor).await {
                Ok(bytes) => return Ok(bytes),
                Err(error) => error,
            };

            match self.retry_decision(&error, attempt, true) {
                RetryDecision::Surface => return Err(error),
                RetryDecision::GiveUp => return Err(SideShiftError::RetriesExhausted),
                RetryDecision::Retry(delay) => {
                    warn!(
                        url = %descriptor.url,
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "image request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// One JSON attempt: dispatch, response handling, payload extraction.
    async fn attempt_json(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<serde_json::Value, SideShiftError> {
        let response = self.dispatch(descriptor).await?;
        let status = response.status();

        // The cancel-order endpoint acknowledges with 204 and no body;
        // synthesize the success envelope the caller expects.
        if status == StatusCode::NO_CONTENT && self.is_cancel_order(&descriptor.url) {
            return Ok(self.synthesized_cancel_body(descriptor));
        }

        let text = response.text().await.map_err(|err| {
            SideShiftError::Shape(HttpFailure::new(
                format!("failed to read response body: {err}"),
                Some(status),
                descriptor,
                None,
            ))
        })?;

        serde_json::from_str(&text).map_err(|err| {
            SideShiftError::Shape(HttpFailure::new(
                "response body is not a valid JSON document",
                Some(status),
                descriptor,
                Some(serde_json::Value::String(err.to_string())),
            ))
        })
    }

    /// One binary attempt: dispatch, response handling, byte extraction.
    ///
    /// A failure to read the bytes of an otherwise-OK response is a shape
    /// violation carrying the response context, distinct from transport
    /// failures and never retried.
    async fn attempt_bytes(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Vec<u8>, SideShiftError> {
        let response = self.dispatch(descriptor).await?;
        let status = response.status();

        match response.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(err) => Err(SideShiftError::Shape(HttpFailure::new(
                format!("failed to process image response: {err}"),
                Some(status),
                descriptor,
                None,
            ))),
        }
    }

    /// Send one attempt, bounded by the configured timeout, and run the
    /// response handler on the result.
    ///
    /// Dropping the in-flight future when the timeout fires cancels the
    /// transport call; a later retry builds a brand-new future and timer.
    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<reqwest::Response, SideShiftError> {
        let mut request = self
            .http
            .request(descriptor.method.clone(), &descriptor.url)
            .headers(descriptor.headers.clone());
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }

        let response = match tokio::time::timeout(self.config.timeout, request.send()).await {
            Ok(result) => result?,
            Err(_) => return Err(SideShiftError::Timeout(self.config.timeout)),
        };

        response::handle_response(response, descriptor, self.config.verbose).await
    }

    fn retry_decision(
        &self,
        error: &SideShiftError,
        attempt: u32,
        retry_allowed: bool,
    ) -> RetryDecision {
        if !retry_allowed || !classify::is_retryable(error) {
            return RetryDecision::Surface;
        }
        if attempt >= self.config.max_retries {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Retry(backoff::delay_for(attempt, &self.config))
    }

    fn is_cancel_order(&self, url: &str) -> bool {
        url == format!("{}{}", self.config.base_url, endpoints::CANCEL_ORDER)
    }

    /// Build the `{success, orderId}` envelope for a bodiless 204 ack.
    ///
    /// The `orderId` is recovered best-effort from the original request
    /// body; a parse failure is logged in verbose mode and yields `null`.
    fn synthesized_cancel_body(&self, descriptor: &RequestDescriptor) -> serde_json::Value {
        let order_id = descriptor
            .body
            .as_deref()
            .and_then(|body| match serde_json::from_str::<serde_json::Value>(body) {
                Ok(parsed) => parsed.get("orderId").cloned(),
                Err(err) => {
                    if self.config.verbose {
                        warn!(error = %err, "failed to parse cancel-order request body");
                    }
                    None
                }
            })
            .unwrap_or(serde_json::Value::Null);

        serde_json::json!({ "success": true, "orderId": order_id })
    }
}

fn ensure_url(descriptor: &RequestDescriptor) -> Result<(), SideShiftError> {
    if descriptor.url.trim().is_empty() {
        return Err(SideShiftError::InvalidInput(
            "invalid URL provided".to_string(),
        ));
    }
    Ok(())
}
