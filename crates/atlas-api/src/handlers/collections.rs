//! Collection handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use atlas_core::types::CollectionId;
use atlas_service::CollectionService;

use crate::dto::response::{CollectionListResponse, CollectionResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Id, ListQuery, Payload};
use crate::state::AppState;

/// GET /api/collections
pub async fn list_collections(
    State(state): State<AppState>,
    auth: AuthUser,
    query: ListQuery,
) -> Result<Json<CollectionListResponse>, ApiError> {
    let collections = state
        .collections
        .list(&auth, &query.collection_filter())
        .await?;

    Ok(Json(CollectionListResponse { collections }))
}

/// POST /api/collections
pub async fn create_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Payload,
) -> Result<(StatusCode, Json<CollectionResponse>), ApiError> {
    let fields = payload.filter(CollectionService::CREATE)?;
    let collection = state.collections.create(&auth, fields).await?;

    Ok((StatusCode::CREATED, Json(CollectionResponse { collection })))
}

/// GET /api/collections/{id}
pub async fn get_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(id): Id<CollectionId>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let collection = state.collections.get(&auth, id).await?;
    Ok(Json(CollectionResponse { collection }))
}

/// PUT /api/collections/{id}
pub async fn update_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(id): Id<CollectionId>,
    payload: Payload,
) -> Result<Json<CollectionResponse>, ApiError> {
    let fields = payload.filter(CollectionService::UPDATE)?;
    let collection = state.collections.update(&auth, id, fields).await?;

    Ok(Json(CollectionResponse { collection }))
}

/// DELETE /api/collections/{id}
pub async fn delete_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Id(id): Id<CollectionId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.collections.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("deleted")))
}
