//! Resource operations. A resource is reachable only through a collection
//! the principal owns.

use std::sync::Arc;

use tracing::info;

use atlas_auth::OwnershipGuard;
use atlas_auth::ownership::not_found_or_denied;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, ResourceId};
use atlas_core::validation::{FieldMap, FieldValue, PayloadSpec};
use atlas_database::ResourceStore;
use atlas_entity::{NewResource, Resource, ResourceChanges, ResourceFilter, ResourceStatus};

use crate::context::RequestContext;
use crate::fields::{ResourceFields, check, normalize_url, nullable_change, parse_last_read_date};

/// Handles resource CRUD.
#[derive(Clone)]
pub struct ResourceService {
    /// Resource store.
    resources: Arc<dyn ResourceStore>,
    /// Ownership checks.
    guard: OwnershipGuard,
}

impl std::fmt::Debug for ResourceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").finish_non_exhaustive()
    }
}

impl ResourceService {
    /// Fields accepted on create.
    pub const CREATE: PayloadSpec =
        PayloadSpec::new(&["title"], &["authors", "url", "status", "last_read_date"]);
    /// Fields accepted on update; all optional.
    pub const UPDATE: PayloadSpec = PayloadSpec::new(
        &[],
        &["title", "authors", "url", "status", "last_read_date"],
    );

    /// Creates a new resource service.
    pub fn new(resources: Arc<dyn ResourceStore>, guard: OwnershipGuard) -> Self {
        Self { resources, guard }
    }

    /// Lists the resources of a collection the principal owns.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        collection_id: CollectionId,
        filter: &ResourceFilter,
    ) -> AppResult<Vec<Resource>> {
        self.guard.collection(collection_id, ctx.user_id()).await?;
        self.resources
            .list_for_collection(collection_id, filter)
            .await
    }

    /// Adds a resource to a collection the principal owns. A missing status
    /// defaults to `Not Started`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        collection_id: CollectionId,
        fields: FieldMap,
    ) -> AppResult<Resource> {
        let title = fields.required_str("title")?;
        let authors = fields.optional_str("authors")?;
        let url = fields.optional_str("url")?.map(|u| normalize_url(&u));
        let status = ResourceStatus::parse_optional(fields.optional_str("status")?.as_deref())?
            .unwrap_or_default();
        let last_read_date = fields
            .optional_str("last_read_date")?
            .map(|raw| parse_last_read_date(&raw))
            .transpose()?;

        check(&ResourceFields {
            title: Some(title.clone()),
            authors: authors.clone(),
            url: url.clone(),
        })?;

        self.guard.collection(collection_id, ctx.user_id()).await?;

        let resource = self
            .resources
            .create(&NewResource {
                collection_id,
                title,
                authors,
                url,
                status,
                last_read_date,
            })
            .await?;

        info!(
            user_id = %ctx.user_id(),
            collection_id = %collection_id,
            resource_id = %resource.id,
            "resource created"
        );
        Ok(resource)
    }

    /// Loads one resource the principal owns through its collection.
    pub async fn get(&self, ctx: &RequestContext, id: ResourceId) -> AppResult<Resource> {
        let (resource, _) = self.guard.resource(id, ctx.user_id()).await?;
        Ok(resource)
    }

    /// Applies a partial update with the same field rules as create.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ResourceId,
        fields: FieldMap,
    ) -> AppResult<Resource> {
        let changes = Self::changes(&fields)?;
        self.guard.resource(id, ctx.user_id()).await?;

        let resource = self
            .resources
            .update(id, &changes)
            .await?
            .ok_or_else(not_found_or_denied)?;

        info!(user_id = %ctx.user_id(), resource_id = %id, "resource updated");
        Ok(resource)
    }

    /// Deletes a resource.
    pub async fn delete(&self, ctx: &RequestContext, id: ResourceId) -> AppResult<()> {
        self.guard.resource(id, ctx.user_id()).await?;

        if !self.resources.delete(id).await? {
            return Err(not_found_or_denied());
        }

        info!(user_id = %ctx.user_id(), resource_id = %id, "resource deleted");
        Ok(())
    }

    fn changes(fields: &FieldMap) -> AppResult<ResourceChanges> {
        let title = match fields.text("title")? {
            FieldValue::Absent => None,
            FieldValue::Cleared => return Err(AppError::validation("title cannot be empty")),
            FieldValue::Set(title) => Some(title),
        };
        let authors = nullable_change(fields.text("authors")?);
        let url = nullable_change(fields.text("url")?).map(|u| u.map(|u| normalize_url(&u)));
        let status = ResourceStatus::parse_optional(fields.optional_str("status")?.as_deref())?;
        let last_read_date = match fields.text("last_read_date")? {
            FieldValue::Absent => None,
            FieldValue::Cleared => Some(None),
            FieldValue::Set(raw) => Some(Some(parse_last_read_date(&raw)?)),
        };

        check(&ResourceFields {
            title: title.clone(),
            authors: authors.clone().flatten(),
            url: url.clone().flatten(),
        })?;

        Ok(ResourceChanges {
            title,
            authors,
            url,
            status,
            last_read_date,
        })
    }
}
