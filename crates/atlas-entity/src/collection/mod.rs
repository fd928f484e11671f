//! Collection domain entities.

pub mod filter;
pub mod model;

pub use filter::{CollectionFilter, CollectionSortKey};
pub use model::{Collection, CollectionChanges, NewCollection};
