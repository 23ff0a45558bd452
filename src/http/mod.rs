//! The resilient request layer.
//!
//! Everything the client sends goes through [`HttpExecutor`]: it arms a
//! per-attempt timeout, hands responses to the response handler, classifies
//! failures, computes backoff and drives the bounded retry loop. Endpoint
//! methods only build a [`RequestDescriptor`] and pick the payload form
//! (JSON document or raw bytes).

mod backoff;
mod classify;
mod executor;
mod response;

pub(crate) use executor::HttpExecutor;

use reqwest::Method;
use reqwest::header::HeaderMap;

/// A fully-built request, constructed by an endpoint wrapper and consumed
/// read-only by the executor. One descriptor can serve several attempts.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Full request URL.
    pub url: String,
    /// HTTP method; POST requests are exempt from retry.
    pub method: Method,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON-encoded request body, for POST requests.
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Descriptor for a GET request.
    pub fn get(url: String, headers: HeaderMap) -> Self {
        Self {
            url,
            method: Method::GET,
            headers,
            body: None,
        }
    }

    /// Descriptor for a POST request with a JSON body.
    pub fn post(url: String, headers: HeaderMap, body: String) -> Self {
        Self {
            url,
            method: Method::POST,
            headers,
            body: Some(body),
        }
    }
}
