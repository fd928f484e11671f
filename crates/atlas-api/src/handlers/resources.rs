//! Resource handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use atlas_core::types::{CollectionId, ResourceId};
use atlas_service::ResourceService;

use crate::dto::response::{MessageResponse, ResourceListResponse, ResourceResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Id, ListQuery, Payload};
use crate::state::AppState;

/// GET /api/collections/{id}/resources
pub async fn list_resources(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(collection_id): Id<CollectionId>,
    query: ListQuery,
) -> Result<Json<ResourceListResponse>, ApiError> {
    let filter = query.resource_filter()?;
    let resources = state
        .resources
        .list(&auth, collection_id, &filter)
        .await?;

    Ok(Json(ResourceListResponse { resources }))
}

/// POST /api/collections/{id}/resources
pub async fn create_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(collection_id): Id<CollectionId>,
    payload: Payload,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    let fields = payload.filter(ResourceService::CREATE)?;
    let resource = state
        .resources
        .create(&auth, collection_id, fields)
        .await?;

    Ok((StatusCode::CREATED, Json(ResourceResponse { resource })))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(id): Id<ResourceId>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let resource = state.resources.get(&auth, id).await?;
    Ok(Json(ResourceResponse { resource }))
}

/// PUT /api/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(id): Id<ResourceId>,
    payload: Payload,
) -> Result<Json<ResourceResponse>, ApiError> {
    let fields = payload.filter(ResourceService::UPDATE)?;
    let resource = state.resources.update(&auth, id, fields).await?;

    Ok(Json(ResourceResponse { resource }))
}

/// DELETE /api/resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(id): Id<ResourceId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.resources.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("deleted")))
}
