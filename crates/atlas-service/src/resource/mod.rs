//! Resource CRUD, owned transitively through the parent collection.

pub mod service;

pub use service::ResourceService;
