//! Response DTOs.
//!
//! Entities serialize themselves; these structs only name the envelope
//! key each endpoint returns them under.

use serde::Serialize;

use atlas_entity::{Collection, Resource, User};
use atlas_service::Suggestion;

/// Simple message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Message.
    pub message: &'static str,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// A message plus the affected user.
#[derive(Debug, Clone, Serialize)]
pub struct UserMessageResponse {
    /// Message.
    pub message: &'static str,
    /// User, without the password hash.
    pub user: User,
}

/// `{"collections": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct CollectionListResponse {
    /// Collections in listing order.
    pub collections: Vec<Collection>,
}

/// `{"collection": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    /// The collection.
    pub collection: Collection,
}

/// `{"resources": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ResourceListResponse {
    /// Resources in listing order.
    pub resources: Vec<Resource>,
}

/// `{"resource": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ResourceResponse {
    /// The resource.
    pub resource: Resource,
}

/// Suggestion results echoed with the query.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    /// Sanitized query.
    pub query: String,
    /// Normalized suggestions.
    pub suggestions: Vec<Suggestion>,
}

/// Health check result.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    /// Server version.
    pub version: &'static str,
    /// Store probe result.
    pub store: &'static str,
}
