//! Collection CRUD scoped to the owning user.

pub mod service;

pub use service::CollectionService;
