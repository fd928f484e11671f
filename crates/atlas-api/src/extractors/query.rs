//! Sanitized listing and suggestion query parameters.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::validation::sanitize_query_param;
use atlas_entity::{CollectionFilter, ResourceFilter, ResourceStatus};

use crate::error::ApiError;

/// Ceiling for free-text search parameters.
const TEXT_PARAM_MAX: usize = 200;

/// Ceiling for keyword parameters such as `sort` and `status`.
const KEYWORD_PARAM_MAX: usize = 50;

#[derive(Debug, Default, Deserialize)]
struct RawListQuery {
    q: Option<String>,
    sort: Option<String>,
    status: Option<String>,
    author: Option<String>,
}

/// Listing parameters after sanitizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Substring search.
    pub q: String,
    /// Sort key; unknown keys fall back to the default order.
    pub sort: String,
    /// Status filter, not yet parsed.
    pub status: String,
    /// Author substring.
    pub author: String,
}

impl ListQuery {
    /// Filter for a collection listing.
    pub fn collection_filter(&self) -> CollectionFilter {
        CollectionFilter::from_params(&self.q, &self.sort)
    }

    /// Filter for a resource listing. An unknown status is rejected.
    pub fn resource_filter(&self) -> AppResult<ResourceFilter> {
        let status = ResourceStatus::parse_optional(Some(&self.status))?;
        Ok(ResourceFilter::from_params(
            &self.q,
            status,
            &self.author,
            &self.sort,
        ))
    }
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(Self {
            q: sanitize_query_param(raw.q.as_deref(), "", TEXT_PARAM_MAX),
            sort: sanitize_query_param(raw.sort.as_deref(), "", KEYWORD_PARAM_MAX),
            status: sanitize_query_param(raw.status.as_deref(), "", KEYWORD_PARAM_MAX),
            author: sanitize_query_param(raw.author.as_deref(), "", TEXT_PARAM_MAX),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSuggestionQuery {
    q: Option<String>,
    limit: Option<String>,
}

/// Suggestion lookup parameters. `limit` stays raw so the service can
/// apply its default and bounds.
#[derive(Debug, Clone, Default)]
pub struct SuggestionQuery {
    /// Free-text query.
    pub q: String,
    /// Requested result count.
    pub limit: Option<String>,
}

impl<S> FromRequestParts<S> for SuggestionQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawSuggestionQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(Self {
            q: cap_text(raw.q.as_deref().unwrap_or_default(), TEXT_PARAM_MAX),
            limit: raw.limit,
        })
    }
}

/// Trims and truncates free text that is forwarded verbatim.
fn cap_text(raw: &str, max_length: usize) -> String {
    raw.trim()
        .chars()
        .take(max_length)
        .collect::<String>()
        .trim_end()
        .to_string()
}
