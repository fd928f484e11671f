//! # atlas-database
//!
//! PostgreSQL connection management, the store traits the services depend
//! on, their Postgres repositories, and an in-process [`MemoryStore`].

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{CollectionStore, HealthProbe, ResourceStore, UserStore};
