//! Reading status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use atlas_core::validation::{EnumValue, parse_enum_value};

/// Reading progress of a resource.
///
/// The canonical strings are used both in storage and at the API boundary.
/// Variants are ordered by workflow position, which is also the listing
/// order for `sort=status`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "resource_status")]
pub enum ResourceStatus {
    /// Not opened yet.
    #[default]
    #[serde(rename = "Not Started")]
    #[sqlx(rename = "Not Started")]
    NotStarted,
    /// Currently reading.
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    /// Put aside for now.
    #[serde(rename = "Paused")]
    #[sqlx(rename = "Paused")]
    Paused,
    /// Finished.
    #[serde(rename = "Completed")]
    #[sqlx(rename = "Completed")]
    Completed,
}

impl EnumValue for ResourceStatus {
    const ALL: &'static [Self] = &[
        Self::NotStarted,
        Self::InProgress,
        Self::Paused,
        Self::Completed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }
}

impl ResourceStatus {
    /// Parse an optional raw value; empty input means "not supplied".
    pub fn parse_optional(raw: Option<&str>) -> atlas_core::AppResult<Option<Self>> {
        parse_enum_value(raw, "status")
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = atlas_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_optional(Some(s))?
            .ok_or_else(|| atlas_core::AppError::validation("status is required"))
    }
}
