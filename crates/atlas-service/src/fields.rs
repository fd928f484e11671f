//! Field-level rules for collection and resource payloads.
//!
//! Inputs arrive as a [`FieldMap`](atlas_core::validation::FieldMap) that
//! already passed presence filtering; the structs here carry the length
//! ceilings and the helpers normalize URLs and dates.

use chrono::{DateTime, NaiveDate, Utc};
use validator::{Validate, ValidationErrors};

use atlas_core::error::AppError;
use atlas_core::validation::FieldValue;

/// Length rules for collection text fields.
#[derive(Debug, Default, Validate)]
pub struct CollectionFields {
    /// Name, when supplied.
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    /// Description, when supplied.
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Length rules for resource text fields.
#[derive(Debug, Default, Validate)]
pub struct ResourceFields {
    /// Title, when supplied.
    #[validate(length(min = 1, max = 300, message = "title must be between 1 and 300 characters"))]
    pub title: Option<String>,
    /// Authors, when supplied.
    #[validate(length(max = 500, message = "authors must be at most 500 characters"))]
    pub authors: Option<String>,
    /// URL after scheme normalization.
    #[validate(length(max = 1000, message = "url must be at most 1000 characters"))]
    pub url: Option<String>,
}

/// Run derive-based rules and fold any failures into one validation error.
pub fn check<T: Validate>(fields: &T) -> Result<(), AppError> {
    fields.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    AppError::validation(messages.join("; "))
}

/// Prefix `https://` when the URL carries no scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Parse a last-read timestamp given as RFC 3339 or a plain date.
pub fn parse_last_read_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            AppError::validation("last_read_date must be an RFC 3339 timestamp or a YYYY-MM-DD date")
        })
}

/// Map a nullable text field into a change: absent keeps, cleared empties.
pub fn nullable_change(value: FieldValue) -> Option<Option<String>> {
    match value {
        FieldValue::Absent => None,
        FieldValue::Cleared => Some(None),
        FieldValue::Set(v) => Some(Some(v)),
    }
}
