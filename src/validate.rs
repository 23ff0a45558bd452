//! Parameter validation helpers for endpoint wrappers.
//!
//! Violations are [`SideShiftError::InvalidInput`] and are raised before any
//! HTTP traffic; the request layer never retries them.

use rust_decimal::Decimal;

use crate::error::SideShiftError;

/// Validate that a value is a non-empty string; returns the trimmed value.
pub(crate) fn require_string(
    value: &str,
    field: &str,
    operation: &str,
) -> Result<String, SideShiftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing(field, operation));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional string; trims when present, rejects blank values.
pub(crate) fn optional_string(
    value: Option<&str>,
    field: &str,
    operation: &str,
) -> Result<Option<String>, SideShiftError> {
    value
        .map(|v| require_string(v, field, operation))
        .transpose()
}

/// Validate that an amount is positive.
pub(crate) fn require_amount(
    value: Decimal,
    field: &str,
    operation: &str,
) -> Result<Decimal, SideShiftError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(missing(field, operation));
    }
    Ok(value)
}

/// Validate a non-empty list of non-empty identifiers.
pub(crate) fn require_ids<S: AsRef<str>>(
    values: &[S],
    field: &str,
    operation: &str,
) -> Result<Vec<String>, SideShiftError> {
    if values.is_empty() {
        return Err(missing(field, operation));
    }
    values
        .iter()
        .map(|v| require_string(v.as_ref(), field, operation))
        .collect()
}

fn missing(field: &str, operation: &str) -> SideShiftError {
    SideShiftError::InvalidInput(format!(
        "missing or invalid {field} parameter in {operation}"
    ))
}
