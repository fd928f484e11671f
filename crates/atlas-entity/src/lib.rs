//! # atlas-entity
//!
//! Domain entity models for Atlas. Every struct in this crate represents a
//! database table row, a change set applied to one, or a list filter.
//! Row entities additionally derive `sqlx::FromRow`.

pub mod collection;
pub mod resource;
pub mod user;

pub use collection::{Collection, CollectionChanges, CollectionFilter, CollectionSortKey, NewCollection};
pub use resource::{NewResource, Resource, ResourceChanges, ResourceFilter, ResourceSortKey, ResourceStatus};
pub use user::{NewUser, User, UserRole};
