//! Composition rules for new passwords.

use atlas_core::error::AppError;

/// Minimum password length in characters.
pub const MIN_LENGTH: usize = 8;

/// Maximum password length in characters.
pub const MAX_LENGTH: usize = 128;

/// Validates new passwords at registration and password change.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Checks length bounds, then uppercase, lowercase and digit presence.
    ///
    /// Reports the first unmet criterion.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < MIN_LENGTH {
            return Err(AppError::validation(format!(
                "password must be at least {MIN_LENGTH} characters long"
            )));
        }
        if length > MAX_LENGTH {
            return Err(AppError::validation(format!(
                "password must be at most {MAX_LENGTH} characters long"
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "password must contain at least one number",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "new password must differ from current password",
            ));
        }
        Ok(())
    }
}
