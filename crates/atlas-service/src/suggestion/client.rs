//! Reqwest-backed suggestion lookup.
//!
//! Owns transport details only: URL construction, timeout, status mapping
//! and JSON decoding. Every failure surfaces as one external-service error.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use atlas_core::config::SuggestionConfig;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;

use super::Suggestion;
use super::dto::SearchResponseDto;

/// Queries the metadata search endpoint.
#[derive(Debug, Clone)]
pub struct SuggestionService {
    client: Client,
    endpoint: Url,
    default_limit: usize,
    max_limit: usize,
}

impl SuggestionService {
    /// Builds the client with the configured timeout and base URL.
    pub fn new(config: &SuggestionConfig) -> AppResult<Self> {
        let endpoint = Url::parse(&format!(
            "{}/search.json",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|e| AppError::configuration(format!("Invalid metadata API URL: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            default_limit: config.default_limit,
            max_limit: config.max_limit.max(1),
        })
    }

    /// Interprets a raw `limit` parameter: unparsable falls back to the
    /// default, then the value is clamped to `1..=max_limit`.
    pub fn clamp_limit(&self, raw: Option<&str>) -> usize {
        raw.and_then(|r| r.trim().parse::<usize>().ok())
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }

    /// Looks up at most `limit` suggestions for `query`.
    ///
    /// An empty query returns nothing without calling upstream.
    pub async fn suggest(&self, query: &str, limit: usize) -> AppResult<Vec<Suggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());

        debug!(%url, "fetching suggestions");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "suggestion request failed");
            AppError::external_service(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "suggestion upstream returned an error status");
            return Err(AppError::external_service(format!(
                "upstream returned {status}"
            )));
        }

        let body: SearchResponseDto = response.json().await.map_err(|e| {
            warn!(error = %e, "suggestion response could not be decoded");
            AppError::external_service(format!("invalid response body: {e}"))
        })?;

        Ok(body
            .docs
            .into_iter()
            .take(limit)
            .map(|doc| doc.into_suggestion())
            .collect())
    }
}
