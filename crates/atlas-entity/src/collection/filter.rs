//! Listing filters for collections.

use atlas_core::types::SortField;

/// Sortable collection fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSortKey {
    /// Case-insensitive name.
    Name,
    /// Creation time.
    CreatedAt,
}

/// Filter and ordering for a collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFilter {
    /// Case-insensitive substring over name and description.
    pub query: Option<String>,
    /// Ordering; ties are broken by id in the same direction.
    pub sort: SortField<CollectionSortKey>,
}

impl CollectionFilter {
    /// Build a filter from sanitized query parameters.
    ///
    /// `sort=name` orders A to Z; anything else yields newest first.
    pub fn from_params(query: &str, sort: &str) -> Self {
        let sort = match sort {
            "name" => SortField::asc(CollectionSortKey::Name),
            _ => SortField::desc(CollectionSortKey::CreatedAt),
        };
        Self {
            query: (!query.is_empty()).then(|| query.to_string()),
            sort,
        }
    }
}

impl Default for CollectionFilter {
    fn default() -> Self {
        Self::from_params("", "")
    }
}
