//! Startup admin seeding.
//!
//! Runs once before the server accepts requests. The outcome is returned
//! and logged; a failure never aborts startup.

use std::fmt;

use tracing::{error, info};

use atlas_auth::PasswordHasher;
use atlas_auth::identity::{normalize_email, validate_username};
use atlas_core::config::AdminConfig;
use atlas_core::result::AppResult;
use atlas_database::UserStore;
use atlas_entity::{NewUser, UserRole};

/// What the bootstrap step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A fresh admin account was created.
    Created,
    /// An existing account with the admin email was promoted.
    Promoted,
    /// Nothing to do, with the reason.
    Skipped(String),
    /// The step could not complete, with the reason.
    Failed(String),
}

impl fmt::Display for BootstrapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Promoted => f.write_str("promoted"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Ensures the configured admin account exists.
///
/// With both `email` and `password` configured: an existing account with
/// that email is promoted; otherwise an admin is created only when the
/// user table is empty.
pub async fn bootstrap_admin(
    config: &AdminConfig,
    users: &dyn UserStore,
    hasher: &PasswordHasher,
) -> BootstrapOutcome {
    let outcome = match config.credentials() {
        None => BootstrapOutcome::Skipped("admin credentials not configured".into()),
        Some((email, password)) => {
            run(email, password, &config.username, users, hasher)
                .await
                .unwrap_or_else(|e| BootstrapOutcome::Failed(e.to_string()))
        }
    };

    match &outcome {
        BootstrapOutcome::Failed(reason) => error!(%reason, "Admin bootstrap failed"),
        other => info!(outcome = %other, "Admin bootstrap finished"),
    }
    outcome
}

async fn run(
    email: &str,
    password: &str,
    username: &str,
    users: &dyn UserStore,
    hasher: &PasswordHasher,
) -> AppResult<BootstrapOutcome> {
    let email = normalize_email(email)?;

    if let Some(existing) = users.find_by_email(&email).await? {
        if existing.is_admin() {
            return Ok(BootstrapOutcome::Skipped("account is already an admin".into()));
        }
        users.set_role(existing.id, UserRole::Admin).await?;
        return Ok(BootstrapOutcome::Promoted);
    }

    if users.count().await? > 0 {
        return Ok(BootstrapOutcome::Skipped("users already exist".into()));
    }

    let username = match validate_username(username) {
        Ok(()) => Some(username.to_string()),
        Err(_) => None,
    };

    users
        .create(&NewUser {
            email,
            username,
            password_hash: hasher.hash_password(password)?,
            role: UserRole::Admin,
        })
        .await?;

    Ok(BootstrapOutcome::Created)
}
