//! Collection entity model.

use atlas_core::types::{CollectionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named grouping of resources owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Collection {
    /// Unique collection identifier.
    pub id: CollectionId,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The owning user. Never changes after creation.
    pub user_id: UserId,
    /// Whether the collection is marked public.
    pub is_public: bool,
    /// When the collection was created.
    pub created_at: DateTime<Utc>,
    /// When the collection was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Check whether `user` owns this collection.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.user_id == user
    }

    /// Apply a validated change set in place and refresh `updated_at`.
    pub fn apply(&mut self, changes: &CollectionChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(is_public) = changes.is_public {
            self.is_public = is_public;
        }
        self.updated_at = now;
    }
}

/// Data required to create a new collection.
#[derive(Debug, Clone)]
pub struct NewCollection {
    /// The owning user.
    pub user_id: UserId,
    /// Validated name.
    pub name: String,
    /// Validated description.
    pub description: Option<String>,
    /// Public flag.
    pub is_public: bool,
}

/// Partial update for a collection. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CollectionChanges {
    /// New name.
    pub name: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New public flag.
    pub is_public: Option<bool>,
}
