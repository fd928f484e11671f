//! Registration, credential login, session resolution, and password and
//! profile changes for the signed-in user.

use std::sync::Arc;

use tracing::{debug, info};

use atlas_auth::identity::{
    EMAIL_MAX_LENGTH, LOGIN_PASSWORD_CAP, cap, normalize_email, validate_username,
};
use atlas_auth::{PasswordHasher, PasswordPolicy, SessionTokens};
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::validation::{FieldMap, FieldValue, PayloadSpec};
use atlas_database::UserStore;
use atlas_database::store::{EMAIL_TAKEN, USERNAME_TAKEN};
use atlas_entity::{NewUser, User, UserRole};

use crate::context::RequestContext;

/// Generic login failure; never says which half was wrong.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Handles account lifecycle and session issuance.
#[derive(Clone)]
pub struct AuthService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Composition rules for new passwords.
    policy: PasswordPolicy,
    /// Session token codec.
    tokens: Arc<SessionTokens>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Fields accepted by registration.
    pub const REGISTER: PayloadSpec = PayloadSpec::new(&["email", "password"], &["username"]);
    /// Fields accepted by login. `email` holds an email or a username.
    pub const LOGIN: PayloadSpec = PayloadSpec::new(&["email", "password"], &[]);
    /// Fields accepted by a profile update.
    pub const UPDATE_PROFILE: PayloadSpec = PayloadSpec::new(&[], &["username"]);
    /// Fields accepted by a password change.
    pub const CHANGE_PASSWORD: PayloadSpec =
        PayloadSpec::new(&["current_password", "new_password"], &[]);

    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<SessionTokens>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy: PasswordPolicy,
            tokens,
        }
    }

    /// Session token codec shared with the HTTP layer.
    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// Registers a new account with the `user` role.
    ///
    /// Field rules run in a fixed order (email format, email length,
    /// username, password length, password composition) before any
    /// uniqueness lookup.
    pub async fn register(&self, fields: FieldMap) -> AppResult<User> {
        let email = normalize_email(&fields.required_str("email")?)?;
        let username = fields.optional_str("username")?;
        if let Some(username) = &username {
            validate_username(username)?;
        }
        let password = fields.required_str("password")?;
        self.policy.validate(&password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        if let Some(username) = &username
            && self.users.find_by_username(username).await?.is_some()
        {
            return Err(AppError::conflict(USERNAME_TAKEN));
        }

        let password_hash = self.hasher.hash_password(&password)?;
        let user = self
            .users
            .create(&NewUser {
                email,
                username,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Checks credentials and issues a session token.
    ///
    /// Both inputs are capped before the lookup. Unknown identifiers and
    /// wrong passwords fail identically.
    pub async fn login(&self, fields: FieldMap) -> AppResult<(User, String)> {
        let identifier = fields.required_str("email")?;
        let password = fields.required_str("password")?;
        let identifier = cap(&identifier, EMAIL_MAX_LENGTH);
        let password = cap(&password, LOGIN_PASSWORD_CAP);

        let Some(user) = self.users.find_login_candidate(identifier).await? else {
            debug!("login rejected: no matching account");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }

    /// Resolves a session token into the acting principal.
    ///
    /// A token whose user is gone or soft-deleted is rejected the same way
    /// as a forged one.
    pub async fn authenticate(&self, token: &str) -> AppResult<RequestContext> {
        let claims = self.tokens.verify(token)?;
        self.users
            .find_by_id(claims.user_id())
            .await?
            .filter(User::is_active)
            .map(RequestContext::new)
            .ok_or_else(|| AppError::authentication("invalid session"))
    }

    /// Sets or clears the display name. Email changes are not supported.
    pub async fn update_profile(&self, ctx: &RequestContext, fields: FieldMap) -> AppResult<User> {
        let username = match fields.text("username")? {
            FieldValue::Absent => return Ok(ctx.user.clone()),
            FieldValue::Cleared => None,
            FieldValue::Set(username) => {
                validate_username(&username)?;
                if let Some(existing) = self.users.find_by_username(&username).await?
                    && existing.id != ctx.user_id()
                {
                    return Err(AppError::conflict(USERNAME_TAKEN));
                }
                Some(username)
            }
        };

        let user = self
            .users
            .update_username(ctx.user_id(), username.as_deref())
            .await?;

        info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Replaces the password after verifying the current one.
    pub async fn change_password(&self, ctx: &RequestContext, fields: FieldMap) -> AppResult<()> {
        let current = fields.required_str("current_password")?;
        let new = fields.required_str("new_password")?;

        let valid = self
            .hasher
            .verify_password(cap(&current, LOGIN_PASSWORD_CAP), &ctx.user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("current password is incorrect"));
        }

        self.policy.validate(&new)?;
        self.policy.validate_not_same(&current, &new)?;

        let hash = self.hasher.hash_password(&new)?;
        self.users.update_password(ctx.user_id(), &hash).await?;

        info!(user_id = %ctx.user_id(), "password changed");
        Ok(())
    }
}
