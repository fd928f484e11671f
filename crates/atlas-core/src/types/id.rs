//! Newtype wrappers around positive `i64` keys for all domain entities.
//!
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `CollectionId` is expected. When the `sqlx` feature is enabled, each ID
//! type also implements `sqlx::Type`, `sqlx::Encode`, and `sqlx::Decode`
//! for PostgreSQL `BIGINT` columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Field name used in validation messages.
            pub const LABEL: &'static str = $label;

            /// Wrap a raw key.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the inner key.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            /// Accepts only a positive decimal integer.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_positive(s, $label).map(Self)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i64 as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i64 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

/// Parse a raw path segment as a positive integer.
///
/// Rejects signs, whitespace, non-digits, zero and overflow with the same
/// message so no malformed key ever reaches a lookup.
pub fn parse_positive(raw: &str, label: &str) -> Result<i64, AppError> {
    let invalid = || AppError::validation(format!("Invalid {label}: must be a positive integer"));

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid()),
    }
}

define_id!(
    /// Unique identifier for a user.
    UserId, "user_id"
);

define_id!(
    /// Unique identifier for a collection.
    CollectionId, "collection_id"
);

define_id!(
    /// Unique identifier for a resource.
    ResourceId, "resource_id"
);
