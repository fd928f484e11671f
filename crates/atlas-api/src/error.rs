//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use atlas_core::error::{AppError, ErrorKind};

/// Message shown instead of the real one on every 5xx.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Underlying reason, only for upstream failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Machine-readable error code.
    pub code: String,
}

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    headline: Option<&'static str>,
}

impl ApiError {
    /// Replaces the public message with `headline`, keeping the original
    /// message as `details`.
    pub fn with_headline(mut self, headline: &'static str) -> Self {
        self.headline = Some(headline);
        self
    }

    /// The wrapped domain error.
    pub fn inner(&self) -> &AppError {
        &self.inner
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            headline: None,
        }
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.inner.kind;
        let status = status_for(kind);

        let body = if kind.is_server_error() {
            tracing::error!(error = %self.inner, "Internal server error");
            ApiErrorResponse {
                error: INTERNAL_MESSAGE.to_string(),
                details: None,
                code: kind.to_string(),
            }
        } else if let Some(headline) = self.headline {
            tracing::warn!(error = %self.inner, "{headline}");
            ApiErrorResponse {
                error: headline.to_string(),
                details: Some(self.inner.message),
                code: kind.to_string(),
            }
        } else {
            ApiErrorResponse {
                error: self.inner.message,
                details: None,
                code: kind.to_string(),
            }
        };

        (status, Json(body)).into_response()
    }
}
