//! Ownership resolution for entity-scoped requests.
//!
//! A collection is owned directly through its `user_id`; a resource is
//! owned transitively through its parent collection. Every failure,
//! whether the entity is missing or belongs to someone else, is the same
//! not-found error so existence never leaks across accounts.

pub mod resolver;

use std::sync::Arc;

use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, ResourceId, UserId};
use atlas_database::{CollectionStore, ResourceStore};
use atlas_entity::{Collection, Resource};

pub use resolver::{CollectionOwnership, OwnershipResolver, ResourceOwnership};

/// Message for every ownership failure.
pub const NOT_FOUND_OR_DENIED: &str = "Resource not found or access denied";

/// The uniform ownership rejection.
pub fn not_found_or_denied() -> AppError {
    AppError::not_found(NOT_FOUND_OR_DENIED)
}

/// Kinds of entity that carry an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Owned directly.
    Collection,
    /// Owned through its collection.
    Resource,
}

impl EntityKind {
    /// Lower-case name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Resource => "resource",
        }
    }
}

/// Routes ownership lookups to the resolver for each entity kind.
#[derive(Clone)]
pub struct OwnershipGuard {
    collections: CollectionOwnership,
    resources: ResourceOwnership,
}

impl OwnershipGuard {
    /// Creates a guard over the given stores.
    pub fn new(
        collection_store: Arc<dyn CollectionStore>,
        resource_store: Arc<dyn ResourceStore>,
    ) -> Self {
        let collections = CollectionOwnership::new(collection_store);
        let resources = ResourceOwnership::new(resource_store, collections.clone());
        Self {
            collections,
            resources,
        }
    }

    /// Resolve a collection owned by `principal`.
    pub async fn collection(&self, id: CollectionId, principal: UserId) -> AppResult<Collection> {
        self.collections.resolve(id, principal).await
    }

    /// Resolve a resource owned by `principal` through its collection.
    pub async fn resource(
        &self,
        id: ResourceId,
        principal: UserId,
    ) -> AppResult<(Resource, Collection)> {
        self.resources.resolve(id, principal).await
    }
}
