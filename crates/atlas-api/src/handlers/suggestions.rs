//! Suggestion lookup handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::SuggestionResponse;
use crate::error::ApiError;
use crate::extractors::SuggestionQuery;
use crate::state::AppState;

/// GET /api/suggestions
pub async fn suggest(
    State(state): State<AppState>,
    query: SuggestionQuery,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let limit = state.suggestions.clamp_limit(query.limit.as_deref());
    let suggestions = state
        .suggestions
        .suggest(&query.q, limit)
        .await
        .map_err(|e| ApiError::from(e).with_headline("failed to fetch suggestions"))?;

    Ok(Json(SuggestionResponse {
        query: query.q,
        suggestions,
    }))
}
