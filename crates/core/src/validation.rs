//! Field-level input validation shared by the API handlers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum accepted password length for admin accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate that a required text field is present and non-blank.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate an email address using the RFC 5322-ish check from `validator`.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate that a password meets the minimum strength requirements.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_rejected() {
        assert!(require_non_empty("  ", "name").is_err());
        assert!(require_non_empty("Ngô Quyền", "name").is_ok());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("admin@vietsu.vn").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@missing-local.vn").is_err());
    }

    #[test]
    fn password_strength() {
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength("long-enough-password").is_ok());
    }
}
