//! Listing filters for resources inside one collection.

use atlas_core::types::SortField;

use super::status::ResourceStatus;

/// Sortable resource fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSortKey {
    /// Case-insensitive title.
    Title,
    /// Workflow position of the status.
    Status,
    /// Creation time.
    CreatedAt,
}

/// Filter and ordering for a resource listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Case-insensitive substring over title and authors.
    pub query: Option<String>,
    /// Exact status match.
    pub status: Option<ResourceStatus>,
    /// Case-insensitive substring over authors only.
    pub author: Option<String>,
    /// Ordering; ties are broken by id in the same direction.
    pub sort: SortField<ResourceSortKey>,
}

impl ResourceFilter {
    /// Build a filter from sanitized query parameters and a parsed status.
    pub fn from_params(query: &str, status: Option<ResourceStatus>, author: &str, sort: &str) -> Self {
        let sort = match sort {
            "title" => SortField::asc(ResourceSortKey::Title),
            "status" => SortField::asc(ResourceSortKey::Status),
            _ => SortField::desc(ResourceSortKey::CreatedAt),
        };
        Self {
            query: (!query.is_empty()).then(|| query.to_string()),
            status,
            author: (!author.is_empty()).then(|| author.to_string()),
            sort,
        }
    }
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self::from_params("", None, "", "")
    }
}
