//! Request context carrying the authenticated principal.

use atlas_core::types::UserId;
use atlas_entity::User;

/// Context for the current authenticated request.
///
/// Built by the session extractor after the session token verified and
/// the user row loaded, then passed into service methods so that every
/// operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The principal, as loaded for this request.
    pub user: User,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// The principal's ID.
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
