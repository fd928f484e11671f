//! Collection operations for the signed-in user.

use std::sync::Arc;

use tracing::info;

use atlas_auth::OwnershipGuard;
use atlas_auth::ownership::not_found_or_denied;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::types::CollectionId;
use atlas_core::validation::{FieldMap, FieldValue, PayloadSpec};
use atlas_database::CollectionStore;
use atlas_entity::{Collection, CollectionChanges, CollectionFilter, NewCollection};

use crate::context::RequestContext;
use crate::fields::{CollectionFields, check, nullable_change};

/// Handles collection CRUD.
#[derive(Clone)]
pub struct CollectionService {
    /// Collection store.
    collections: Arc<dyn CollectionStore>,
    /// Ownership checks.
    guard: OwnershipGuard,
}

impl std::fmt::Debug for CollectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionService").finish_non_exhaustive()
    }
}

impl CollectionService {
    /// Fields accepted on create.
    pub const CREATE: PayloadSpec = PayloadSpec::new(&["name"], &["description", "is_public"]);
    /// Fields accepted on update; all optional.
    pub const UPDATE: PayloadSpec = PayloadSpec::new(&[], &["name", "description", "is_public"]);

    /// Creates a new collection service.
    pub fn new(collections: Arc<dyn CollectionStore>, guard: OwnershipGuard) -> Self {
        Self { collections, guard }
    }

    /// Lists the principal's collections.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<Collection>> {
        self.collections.list_for_user(ctx.user_id(), filter).await
    }

    /// Creates a collection owned by the principal.
    pub async fn create(&self, ctx: &RequestContext, fields: FieldMap) -> AppResult<Collection> {
        let name = fields.required_str("name")?;
        let description = fields.optional_str("description")?;
        let is_public = fields.optional_bool("is_public")?.unwrap_or(false);

        check(&CollectionFields {
            name: Some(name.clone()),
            description: description.clone(),
        })?;

        let collection = self
            .collections
            .create(&NewCollection {
                user_id: ctx.user_id(),
                name,
                description,
                is_public,
            })
            .await?;

        info!(user_id = %ctx.user_id(), collection_id = %collection.id, "collection created");
        Ok(collection)
    }

    /// Loads one collection the principal owns.
    pub async fn get(&self, ctx: &RequestContext, id: CollectionId) -> AppResult<Collection> {
        self.guard.collection(id, ctx.user_id()).await
    }

    /// Applies a partial update. An empty payload only refreshes
    /// `updated_at`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: CollectionId,
        fields: FieldMap,
    ) -> AppResult<Collection> {
        let changes = Self::changes(&fields)?;
        self.guard.collection(id, ctx.user_id()).await?;

        let collection = self
            .collections
            .update(id, &changes)
            .await?
            .ok_or_else(not_found_or_denied)?;

        info!(user_id = %ctx.user_id(), collection_id = %id, "collection updated");
        Ok(collection)
    }

    /// Deletes a collection and every resource in it.
    pub async fn delete(&self, ctx: &RequestContext, id: CollectionId) -> AppResult<()> {
        self.guard.collection(id, ctx.user_id()).await?;

        if !self.collections.delete(id).await? {
            return Err(not_found_or_denied());
        }

        info!(user_id = %ctx.user_id(), collection_id = %id, "collection deleted");
        Ok(())
    }

    fn changes(fields: &FieldMap) -> AppResult<CollectionChanges> {
        let name = match fields.text("name")? {
            FieldValue::Absent => None,
            FieldValue::Cleared => return Err(AppError::validation("name cannot be empty")),
            FieldValue::Set(name) => Some(name),
        };
        let description = nullable_change(fields.text("description")?);

        check(&CollectionFields {
            name: name.clone(),
            description: description.clone().flatten(),
        })?;

        Ok(CollectionChanges {
            name,
            description,
            is_public: fields.optional_bool("is_public")?,
        })
    }
}
