//! Request payload normalization shared by every mutating endpoint.
//!
//! This module only decides *which* fields reach domain logic and whether
//! the required ones are present. Semantic rules (length ceilings,
//! character classes, formats) are applied by the callers afterwards.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::result::AppResult;

/// Declared field set for one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSpec {
    /// Fields that must be present and non-empty.
    pub required: &'static [&'static str],
    /// Fields that may be present.
    pub optional: &'static [&'static str],
}

impl PayloadSpec {
    /// Create a field declaration.
    pub const fn new(required: &'static [&'static str], optional: &'static [&'static str]) -> Self {
        Self { required, optional }
    }

    fn declares(&self, field: &str) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }

    /// Filter a raw body down to the declared fields.
    ///
    /// String values are trimmed. Every absent or empty required field is
    /// reported in a single error, in declaration order.
    pub fn filter(&self, body: Option<Value>) -> AppResult<FieldMap> {
        let object = match body {
            Some(Value::Object(object)) => object,
            Some(Value::Null) | None => return Err(AppError::validation("JSON input required")),
            Some(_) => return Err(AppError::validation("JSON object required")),
        };

        let mut fields = Map::new();
        for (key, value) in object {
            if !self.declares(&key) {
                continue;
            }
            let value = match value {
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other,
            };
            fields.insert(key, value);
        }

        let missing: Vec<&str> = self
            .required
            .iter()
            .copied()
            .filter(|name| fields.get(*name).is_none_or(is_empty))
            .collect();

        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(FieldMap(fields))
    }
}

/// Falsy values count as missing: `null`, `false`, zero and empty
/// strings, arrays or objects.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// A payload that passed [`PayloadSpec::filter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Map<String, Value>);

/// How a single optional field appeared in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The key was not sent.
    Absent,
    /// The key was sent as `null` or an empty string.
    Cleared,
    /// The key was sent with a non-empty value.
    Set(String),
}

impl FieldMap {
    /// Whether the caller sent the field at all.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// A required string field. Numbers are rendered as text.
    pub fn required_str(&self, field: &str) -> AppResult<String> {
        match self.text(field)? {
            FieldValue::Set(value) => Ok(value),
            _ => Err(AppError::validation(format!(
                "Missing required fields: {field}"
            ))),
        }
    }

    /// An optional string field; empty strings count as unset.
    pub fn optional_str(&self, field: &str) -> AppResult<Option<String>> {
        match self.text(field)? {
            FieldValue::Set(value) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// A string field distinguishing "not sent" from "cleared".
    pub fn text(&self, field: &str) -> AppResult<FieldValue> {
        match self.0.get(field) {
            None => Ok(FieldValue::Absent),
            Some(Value::Null) => Ok(FieldValue::Cleared),
            Some(Value::String(s)) if s.is_empty() => Ok(FieldValue::Cleared),
            Some(Value::String(s)) => Ok(FieldValue::Set(s.clone())),
            Some(Value::Number(n)) => Ok(FieldValue::Set(n.to_string())),
            Some(_) => Err(AppError::validation(format!("{field} must be a string"))),
        }
    }

    /// An optional boolean flag. Accepts JSON booleans and the strings
    /// `"true"`/`"false"`/`"1"`/`"0"`/`"on"`/`"off"`.
    pub fn optional_bool(&self, field: &str) -> AppResult<Option<bool>> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
                "" => Ok(None),
                "true" | "1" | "on" | "yes" => Ok(Some(true)),
                "false" | "0" | "off" | "no" => Ok(Some(false)),
                _ => Err(AppError::validation(format!("{field} must be a boolean"))),
            },
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(AppError::validation(format!("{field} must be a boolean"))),
            },
            Some(_) => Err(AppError::validation(format!("{field} must be a boolean"))),
        }
    }
}

/// Normalize a raw query parameter for safe reuse in listings.
///
/// Falls back to `default` when absent, truncates to `max_length`
/// characters, strips markup characters, then trims.
pub fn sanitize_query_param(raw: Option<&str>, default: &str, max_length: usize) -> String {
    let value = raw.unwrap_or(default);
    let truncated: String = value.chars().take(max_length).collect();
    truncated
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

/// A closed enumeration with canonical string forms.
pub trait EnumValue: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Canonical string form of this variant.
    fn as_str(&self) -> &'static str;

    /// Comma-separated list of the canonical forms.
    fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Match `raw` against the canonical forms of `E`.
///
/// Empty input yields `Ok(None)` so the caller chooses the default; any
/// other non-matching input is rejected with the list of valid values.
pub fn parse_enum_value<E: EnumValue>(raw: Option<&str>, field: &str) -> AppResult<Option<E>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    E::ALL
        .iter()
        .copied()
        .find(|v| v.as_str() == raw)
        .map(Some)
        .ok_or_else(|| {
            AppError::validation(format!(
                "Invalid {field}. Valid values: {}",
                E::valid_values()
            ))
        })
}
