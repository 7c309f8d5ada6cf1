//! Boundary validation of request bodies.
//!
//! Handlers trust their inputs to be well-shaped; these checks enforce the
//! length and format limits before a command is built.

use url::Url;

use crate::error::ApiError;

/// A request body that can report its own shape violations.
pub trait Validate {
    /// Returns an empty `Vec` if valid; otherwise human-readable errors.
    fn validate(&self) -> Vec<String>;
}

/// Passes `request` through if it is valid.
///
/// # Errors
///
/// Returns `ApiError::InvalidRequest` listing every violation.
pub fn validated<T: Validate>(request: T) -> Result<T, ApiError> {
    let errors = request.validate();
    if errors.is_empty() {
        Ok(request)
    } else {
        Err(ApiError::InvalidRequest(errors))
    }
}

/// Requires `value` to be `min..=max` characters long.
pub fn check_length(errors: &mut Vec<String>, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min || len > max {
        if min == 0 {
            errors.push(format!("{field} must be at most {max} characters"));
        } else {
            errors.push(format!("{field} must be {min} to {max} characters"));
        }
    }
}

/// Requires `value`, when present, to be non-negative.
pub fn check_non_negative(errors: &mut Vec<String>, field: &str, value: Option<i32>) {
    if value.is_some_and(|v| v < 0) {
        errors.push(format!("{field} must not be negative"));
    }
}

/// Requires `photoMin <= photoMax` when both are set.
pub fn check_photo_bounds(errors: &mut Vec<String>, photo_min: Option<i32>, photo_max: Option<i32>) {
    check_non_negative(errors, "photoMin", photo_min);
    check_non_negative(errors, "photoMax", photo_max);
    if matches!((photo_min, photo_max), (Some(min), Some(max)) if min > max) {
        errors.push("photoMin must not exceed photoMax".to_owned());
    }
}

/// Requires every entry to parse as an absolute URL.
pub fn check_urls(errors: &mut Vec<String>, field: &str, values: &[String]) {
    for (index, value) in values.iter().enumerate() {
        if let Err(e) = Url::parse(value) {
            errors.push(format!("{field}[{index}] is not a valid URL: {e}"));
        }
    }
}
