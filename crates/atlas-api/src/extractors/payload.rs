//! Raw JSON bodies, filtered against a per-endpoint field declaration.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use atlas_core::error::AppError;
use atlas_core::validation::{FieldMap, PayloadSpec};

use crate::error::ApiError;

/// A request body that may be absent.
///
/// Parsing is lenient about content type; an empty body is `None` so the
/// validation stage can report it as missing input.
#[derive(Debug, Clone)]
pub struct Payload(pub Option<Value>);

impl Payload {
    /// Run presence filtering for `spec`.
    pub fn filter(self, spec: PayloadSpec) -> Result<FieldMap, ApiError> {
        Ok(spec.filter(self.0)?)
    }
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        serde_json::from_slice(&bytes)
            .map(|value| Self(Some(value)))
            .map_err(|_| AppError::validation("malformed JSON body").into())
    }
}
