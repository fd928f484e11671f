//! Resource entity model.

use atlas_core::types::{CollectionId, ResourceId};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use sqlx::FromRow;

use super::status::ResourceStatus;

/// A trackable item inside a collection.
///
/// Ownership is inherited from the parent collection; there is no direct
/// owner column.
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: ResourceId,
    /// Title.
    pub title: String,
    /// Comma-separated author names.
    pub authors: Option<String>,
    /// Link to the resource, always with a scheme.
    pub url: Option<String>,
    /// Reading status.
    pub status: ResourceStatus,
    /// When the user last read it.
    pub last_read_date: Option<DateTime<Utc>>,
    /// Parent collection. Never changes after creation.
    pub collection_id: CollectionId,
    /// When the resource was created.
    pub created_at: DateTime<Utc>,
    /// When the resource was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// The authors field split on commas, trimmed, empties removed.
    pub fn authors_list(&self) -> Vec<String> {
        self.authors
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect()
    }

    /// Apply a validated change set in place and refresh `updated_at`.
    pub fn apply(&mut self, changes: &ResourceChanges, now: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(authors) = &changes.authors {
            self.authors = authors.clone();
        }
        if let Some(url) = &changes.url {
            self.url = url.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(last_read_date) = changes.last_read_date {
            self.last_read_date = last_read_date;
        }
        self.updated_at = now;
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Resource", 10)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("authors", &self.authors)?;
        s.serialize_field("authors_list", &self.authors_list())?;
        s.serialize_field("url", &self.url)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("last_read_date", &self.last_read_date)?;
        s.serialize_field("collection_id", &self.collection_id)?;
        s.serialize_field("created_at", &self.created_at)?;
        s.serialize_field("updated_at", &self.updated_at)?;
        s.end()
    }
}

/// Data required to create a new resource.
#[derive(Debug, Clone)]
pub struct NewResource {
    /// Parent collection.
    pub collection_id: CollectionId,
    /// Validated title.
    pub title: String,
    /// Validated authors.
    pub authors: Option<String>,
    /// Normalized URL.
    pub url: Option<String>,
    /// Initial status.
    pub status: ResourceStatus,
    /// Optional last-read time.
    pub last_read_date: Option<DateTime<Utc>>,
}

/// Partial update for a resource. `None` leaves a field unchanged;
/// `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct ResourceChanges {
    /// New title.
    pub title: Option<String>,
    /// New authors.
    pub authors: Option<Option<String>>,
    /// New URL.
    pub url: Option<Option<String>>,
    /// New status.
    pub status: Option<ResourceStatus>,
    /// New last-read time.
    pub last_read_date: Option<Option<DateTime<Utc>>>,
}
