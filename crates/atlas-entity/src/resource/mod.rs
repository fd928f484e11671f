//! Resource domain entities.

pub mod filter;
pub mod model;
pub mod status;

pub use filter::{ResourceFilter, ResourceSortKey};
pub use model::{NewResource, Resource, ResourceChanges};
pub use status::ResourceStatus;
