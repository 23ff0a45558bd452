//! Credential management and header construction for SideShift API calls.
//!
//! SideShift authenticates private endpoints with an `x-sideshift-secret`
//! header; the affiliate id travels in query strings and request bodies
//! rather than headers. A `commissionRate` header is attached only when the
//! configured rate deviates from the documented default.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::SideShiftError;

/// Header carrying the account secret.
pub const SECRET_HEADER: &str = "x-sideshift-secret";
/// Header carrying a non-default commission rate.
pub const COMMISSION_RATE_HEADER: &str = "commissionRate";
/// Header forwarding the end user's IP address on order-creating calls.
pub const USER_IP_HEADER: &str = "x-user-ip";

/// Commission rate assumed by the API when no header is sent.
pub const DEFAULT_COMMISSION_RATE: &str = "0.5";

/// Headers whose values are replaced with `[FILTERED]` before logging.
const SENSITIVE_HEADERS: &[&str] = &[SECRET_HEADER];

/// Account credentials: the private API secret and the public affiliate id.
#[derive(Clone)]
pub struct Credentials {
    /// The affiliate (account) id, sent in query strings and bodies.
    pub affiliate_id: String,
    /// The account secret, sent as a request header on private endpoints.
    secret: SecretString,
}

impl Credentials {
    /// Create credentials from an account secret and affiliate id.
    pub fn new(secret: impl Into<String>, affiliate_id: impl Into<String>) -> Self {
        Self {
            affiliate_id: affiliate_id.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Get the account secret.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("affiliate_id", &self.affiliate_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Headers for unauthenticated JSON endpoints.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Headers for the coin icon endpoint, which serves SVG images.
pub(crate) fn icon_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("image/svg"));
    headers
}

/// Headers for authenticated endpoints: JSON content type plus the secret.
pub(crate) fn token_headers(credentials: &Credentials) -> Result<HeaderMap, SideShiftError> {
    let mut headers = default_headers();
    headers.insert(
        HeaderName::from_static(SECRET_HEADER),
        header_value(credentials.expose_secret(), "secret")?,
    );
    Ok(headers)
}

/// Headers for commission-bearing endpoints.
///
/// The `commissionRate` header is attached only when the rate differs from
/// [`DEFAULT_COMMISSION_RATE`]; the API assumes the default otherwise.
pub(crate) fn commission_headers(
    credentials: &Credentials,
    commission_rate: &str,
) -> Result<HeaderMap, SideShiftError> {
    let mut headers = token_headers(credentials)?;
    if commission_rate != DEFAULT_COMMISSION_RATE {
        headers.insert(
            HeaderName::from_static("commissionrate"),
            header_value(commission_rate, "commissionRate")?,
        );
    }
    Ok(headers)
}

/// Attach the optional `x-user-ip` passthrough header.
pub(crate) fn with_user_ip(
    mut headers: HeaderMap,
    user_ip: Option<&str>,
) -> Result<HeaderMap, SideShiftError> {
    if let Some(ip) = user_ip {
        headers.insert(
            HeaderName::from_static(USER_IP_HEADER),
            header_value(ip, "userIp")?,
        );
    }
    Ok(headers)
}

fn header_value(value: &str, field: &str) -> Result<HeaderValue, SideShiftError> {
    HeaderValue::from_str(value).map_err(|_| {
        SideShiftError::InvalidInput(format!(
            "{field} contains characters not permitted in a header value"
        ))
    })
}

/// Render headers for logging with secret-bearing values filtered out.
pub(crate) fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let rendered = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[FILTERED]".to_string()
            } else {
                value.to_str().unwrap_or("<non-ascii>").to_string()
            };
            (name.as_str().to_string(), rendered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("super-secret", "abc123");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("abc123"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_token_headers_carry_secret() {
        let credentials = Credentials::new("super-secret", "abc123");
        let headers = token_headers(&credentials).unwrap();
        assert_eq!(headers.get(SECRET_HEADER).unwrap(), "super-secret");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_default_commission_rate_sends_no_header() {
        let credentials = Credentials::new("super-secret", "abc123");
        let headers = commission_headers(&credentials, DEFAULT_COMMISSION_RATE).unwrap();
        assert!(headers.get(COMMISSION_RATE_HEADER).is_none());
    }

    #[test]
    fn test_custom_commission_rate_sends_header() {
        let credentials = Credentials::new("super-secret", "abc123");
        let headers = commission_headers(&credentials, "1.0").unwrap();
        assert_eq!(headers.get(COMMISSION_RATE_HEADER).unwrap(), "1.0");
    }

    #[test]
    fn test_redact_headers_filters_secret() {
        let credentials = Credentials::new("super-secret", "abc123");
        let redacted = redact_headers(&token_headers(&credentials).unwrap());
        let secret = redacted
            .iter()
            .find(|(name, _)| name == SECRET_HEADER)
            .unwrap();
        assert_eq!(secret.1, "[FILTERED]");
    }

    #[test]
    fn test_user_ip_header_is_optional() {
        let headers = with_user_ip(default_headers(), None).unwrap();
        assert!(headers.get(USER_IP_HEADER).is_none());
        let headers = with_user_ip(default_headers(), Some("203.0.113.7")).unwrap();
        assert_eq!(headers.get(USER_IP_HEADER).unwrap(), "203.0.113.7");
    }
}
