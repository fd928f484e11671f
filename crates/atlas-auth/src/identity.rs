//! Email and username rules shared by registration, profile updates and
//! admin bootstrap.

use atlas_core::error::AppError;

/// Maximum email length in characters.
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Username length bounds in characters.
pub const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=50;

/// Cap applied to the login password before any work is done with it.
pub const LOGIN_PASSWORD_CAP: usize = 128;

/// Checks the `local@domain.tld` shape: a local part of
/// `[A-Za-z0-9._%+-]`, one `@`, a domain of `[A-Za-z0-9.-]` and a final
/// label of at least two ASCII letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

/// Validates an email for registration and returns its stored form.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AppError::validation("invalid email format"));
    }
    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(AppError::validation("email is too long"));
    }
    Ok(email.to_lowercase())
}

/// Validates a display name: 3 to 50 of `[A-Za-z0-9_-]`.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if !USERNAME_LENGTH.contains(&username.chars().count()) {
        return Err(AppError::validation("username must be 3-50 characters"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
    {
        return Err(AppError::validation(
            "username may only contain letters, numbers, underscores and hyphens",
        ));
    }
    Ok(())
}

/// Truncate `value` to at most `max` characters.
pub fn cap(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
