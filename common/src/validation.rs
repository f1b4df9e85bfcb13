//! Field checks run before a form is submitted to the API. A failing check blocks the request
//! entirely and its message is shown to the user as is.

use lazy_regex::{regex, Lazy, Regex};

use crate::error::{PortalError, PortalResult};

/// Loose email shape check. Deliverability is the server's concern.
static EMAIL_REGEX: &Lazy<Regex, fn() -> Regex> = regex!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$");

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Check that the `value` of `field` is not empty after trimming whitespace
/// # Errors
/// This function will return an error if the value is blank
pub fn require(field: &'static str, value: &str) -> PortalResult<()> {
    if value.trim().is_empty() {
        return Err(PortalError::Validation {
            field,
            message: format!("{field} is required"),
        });
    }
    Ok(())
}

/// Check that `value` is a non-empty, email shaped string
/// # Errors
/// This function will return an error if the value is blank or not an email address
pub fn email(field: &'static str, value: &str) -> PortalResult<()> {
    require(field, value)?;
    if !EMAIL_REGEX.is_match(value.trim()) {
        return Err(PortalError::Validation {
            field,
            message: format!("{field} must be a valid email address"),
        });
    }
    Ok(())
}

/// Check that `value` has at least `length` characters
/// # Errors
/// This function will return an error if the value is shorter than `length`
pub fn min_length(field: &'static str, value: &str, length: usize) -> PortalResult<()> {
    if value.chars().count() < length {
        return Err(PortalError::Validation {
            field,
            message: format!("{field} must be at least {length} characters"),
        });
    }
    Ok(())
}
