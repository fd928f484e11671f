//! One ownership resolver per entity kind.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, ResourceId, UserId};
use atlas_database::{CollectionStore, ResourceStore};
use atlas_entity::{Collection, Resource};

use super::{EntityKind, not_found_or_denied};

/// Loads an entity only when `principal` owns it.
#[async_trait]
pub trait OwnershipResolver: Send + Sync {
    /// Identifier type of the entity.
    type Id: Send + Copy + std::fmt::Display;
    /// What a successful resolution yields.
    type Output: Send;

    /// The entity kind this resolver handles.
    const KIND: EntityKind;

    /// Returns the entity, or the uniform not-found error.
    async fn resolve(&self, id: Self::Id, principal: UserId) -> AppResult<Self::Output>;
}

/// Direct ownership through `collections.user_id`.
#[derive(Clone)]
pub struct CollectionOwnership {
    store: Arc<dyn CollectionStore>,
}

impl CollectionOwnership {
    /// Creates the resolver.
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnershipResolver for CollectionOwnership {
    type Id = CollectionId;
    type Output = Collection;

    const KIND: EntityKind = EntityKind::Collection;

    async fn resolve(&self, id: CollectionId, principal: UserId) -> AppResult<Collection> {
        match self.store.find_by_id(id).await? {
            Some(collection) if collection.is_owned_by(principal) => Ok(collection),
            Some(_) => {
                debug!(kind = Self::KIND.as_str(), %id, %principal, "Ownership check denied");
                Err(not_found_or_denied())
            }
            None => Err(not_found_or_denied()),
        }
    }
}

/// Transitive ownership through the parent collection.
#[derive(Clone)]
pub struct ResourceOwnership {
    store: Arc<dyn ResourceStore>,
    collections: CollectionOwnership,
}

impl ResourceOwnership {
    /// Creates the resolver; `collections` checks the parent.
    pub fn new(store: Arc<dyn ResourceStore>, collections: CollectionOwnership) -> Self {
        Self { store, collections }
    }
}

#[async_trait]
impl OwnershipResolver for ResourceOwnership {
    type Id = ResourceId;
    type Output = (Resource, Collection);

    const KIND: EntityKind = EntityKind::Resource;

    async fn resolve(&self, id: ResourceId, principal: UserId) -> AppResult<(Resource, Collection)> {
        let resource = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(not_found_or_denied)?;

        let collection = self
            .collections
            .resolve(resource.collection_id, principal)
            .await
            .inspect_err(|_| {
                debug!(kind = Self::KIND.as_str(), %id, %principal, "Ownership check denied");
            })?;

        Ok((resource, collection))
    }
}
