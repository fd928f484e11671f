//! Store traits the service layer depends on.
//!
//! Each trait has a Postgres implementation in [`crate::repositories`] and
//! an in-process implementation in [`crate::memory`]. Every write is a
//! single atomic operation; deleting a parent removes its dependents in
//! the same operation.

use async_trait::async_trait;

use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, ResourceId, UserId};
use atlas_entity::{
    Collection, CollectionChanges, CollectionFilter, NewCollection, NewResource, NewUser, Resource,
    ResourceChanges, ResourceFilter, User, UserRole,
};

/// Conflict message for a duplicate email.
pub const EMAIL_TAKEN: &str = "email already registered";

/// Conflict message for a duplicate username.
pub const USERNAME_TAKEN: &str = "username already taken";

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key, deleted or not.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email, compared case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a non-deleted user whose email matches `identifier`
    /// case-insensitively or whose username matches it exactly.
    /// An email match wins over a username match.
    async fn find_login_candidate(&self, identifier: &str) -> AppResult<Option<User>>;

    /// Insert a user. Duplicate email or username yields a conflict.
    async fn create(&self, data: &NewUser) -> AppResult<User>;

    /// Set or clear the username.
    async fn update_username(&self, id: UserId, username: Option<&str>) -> AppResult<User>;

    /// Replace the password hash.
    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()>;

    /// Change a user's role.
    async fn set_role(&self, id: UserId, role: UserRole) -> AppResult<User>;

    /// Count all users, including soft-deleted ones.
    async fn count(&self) -> AppResult<i64>;

    /// Hard-delete a user and everything they own.
    async fn delete(&self, id: UserId) -> AppResult<bool>;
}

/// Persistence for collections.
#[async_trait]
pub trait CollectionStore: Send + Sync + 'static {
    /// List a user's collections.
    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<Collection>>;

    /// Find a collection by primary key regardless of owner.
    async fn find_by_id(&self, id: CollectionId) -> AppResult<Option<Collection>>;

    /// Insert a collection.
    async fn create(&self, data: &NewCollection) -> AppResult<Collection>;

    /// Apply a partial update. Returns `None` when the row is gone.
    async fn update(
        &self,
        id: CollectionId,
        changes: &CollectionChanges,
    ) -> AppResult<Option<Collection>>;

    /// Delete a collection and its resources.
    async fn delete(&self, id: CollectionId) -> AppResult<bool>;
}

/// Persistence for resources.
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// List the resources of one collection.
    async fn list_for_collection(
        &self,
        collection_id: CollectionId,
        filter: &ResourceFilter,
    ) -> AppResult<Vec<Resource>>;

    /// Find a resource by primary key regardless of owner.
    async fn find_by_id(&self, id: ResourceId) -> AppResult<Option<Resource>>;

    /// Insert a resource.
    async fn create(&self, data: &NewResource) -> AppResult<Resource>;

    /// Apply a partial update. Returns `None` when the row is gone.
    async fn update(&self, id: ResourceId, changes: &ResourceChanges)
    -> AppResult<Option<Resource>>;

    /// Delete a resource.
    async fn delete(&self, id: ResourceId) -> AppResult<bool>;
}

/// Liveness probe for the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync + 'static {
    /// Returns an error when the store cannot serve queries.
    async fn ping(&self) -> AppResult<()>;
}

/// Escape `%`, `_` and `\` so user text matches literally inside `LIKE`.
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
