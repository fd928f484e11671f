//! Resource repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use atlas_core::error::{AppError, ErrorKind};
use atlas_core::result::AppResult;
use atlas_core::types::{CollectionId, ResourceId};
use atlas_entity::{NewResource, Resource, ResourceChanges, ResourceFilter, ResourceSortKey};

use crate::store::{ResourceStore, like_pattern};

/// Postgres-backed [`ResourceStore`].
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(filter: &ResourceFilter) -> String {
    let dir = filter.sort.direction.as_sql();
    match filter.sort.field {
        ResourceSortKey::Title => format!("LOWER(title) {dir}, id {dir}"),
        // Enum columns order by declaration, i.e. workflow position.
        ResourceSortKey::Status => format!("status {dir}, id {dir}"),
        ResourceSortKey::CreatedAt => format!("created_at {dir}, id {dir}"),
    }
}

#[async_trait]
impl ResourceStore for ResourceRepository {
    async fn list_for_collection(
        &self,
        collection_id: CollectionId,
        filter: &ResourceFilter,
    ) -> AppResult<Vec<Resource>> {
        let sql = format!(
            "SELECT * FROM resources \
             WHERE collection_id = $1 \
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR COALESCE(authors, '') ILIKE $2) \
               AND ($3::resource_status IS NULL OR status = $3) \
               AND ($4::TEXT IS NULL OR COALESCE(authors, '') ILIKE $4) \
             ORDER BY {}",
            order_clause(filter)
        );

        sqlx::query_as::<_, Resource>(&sql)
            .bind(collection_id)
            .bind(filter.query.as_deref().map(like_pattern))
            .bind(filter.status)
            .bind(filter.author.as_deref().map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list resources", e))
    }

    async fn find_by_id(&self, id: ResourceId) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find resource", e))
    }

    async fn create(&self, data: &NewResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (title, authors, url, status, last_read_date, collection_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.authors)
        .bind(&data.url)
        .bind(data.status)
        .bind(data.last_read_date)
        .bind(data.collection_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create resource", e))
    }

    async fn update(
        &self,
        id: ResourceId,
        changes: &ResourceChanges,
    ) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET \
                title = COALESCE($2, title), \
                authors = CASE WHEN $3 THEN $4 ELSE authors END, \
                url = CASE WHEN $5 THEN $6 ELSE url END, \
                status = COALESCE($7, status), \
                last_read_date = CASE WHEN $8 THEN $9 ELSE last_read_date END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(changes.authors.is_some())
        .bind(changes.authors.clone().flatten())
        .bind(changes.url.is_some())
        .bind(changes.url.clone().flatten())
        .bind(changes.status)
        .bind(changes.last_read_date.is_some())
        .bind(changes.last_read_date.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update resource", e))
    }

    async fn delete(&self, id: ResourceId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete resource", e))?;

        Ok(result.rows_affected() > 0)
    }
}
