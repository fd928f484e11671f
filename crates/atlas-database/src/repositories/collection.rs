//! Collection repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use atlas_core::error::{AppError, ErrorKind};
use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, UserId};
use atlas_entity::{Collection, CollectionChanges, CollectionFilter, CollectionSortKey, NewCollection};

use crate::store::{CollectionStore, like_pattern};

/// Postgres-backed [`CollectionStore`].
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: PgPool,
}

impl CollectionRepository {
    /// Create a new collection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(filter: &CollectionFilter) -> String {
    let dir = filter.sort.direction.as_sql();
    match filter.sort.field {
        CollectionSortKey::Name => format!("LOWER(name) {dir}, id {dir}"),
        CollectionSortKey::CreatedAt => format!("created_at {dir}, id {dir}"),
    }
}

#[async_trait]
impl CollectionStore for CollectionRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<Collection>> {
        let sql = format!(
            "SELECT * FROM collections \
             WHERE user_id = $1 \
               AND ($2::TEXT IS NULL OR name ILIKE $2 OR COALESCE(description, '') ILIKE $2) \
             ORDER BY {}",
            order_clause(filter)
        );

        sqlx::query_as::<_, Collection>(&sql)
            .bind(user_id)
            .bind(filter.query.as_deref().map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list collections", e))
    }

    async fn find_by_id(&self, id: CollectionId) -> AppResult<Option<Collection>> {
        sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find collection", e))
    }

    async fn create(&self, data: &NewCollection) -> AppResult<Collection> {
        sqlx::query_as::<_, Collection>(
            "INSERT INTO collections (name, description, user_id, is_public) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.user_id)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create collection", e))
    }

    async fn update(
        &self,
        id: CollectionId,
        changes: &CollectionChanges,
    ) -> AppResult<Option<Collection>> {
        sqlx::query_as::<_, Collection>(
            "UPDATE collections SET \
                name = COALESCE($2, name), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                is_public = COALESCE($5, is_public), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.is_public)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update collection", e))
    }

    async fn delete(&self, id: CollectionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete collection", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
