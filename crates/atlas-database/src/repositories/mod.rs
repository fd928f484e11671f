//! Postgres implementations of the store traits.

pub mod collection;
pub mod resource;
pub mod user;

pub use collection::CollectionRepository;
pub use resource::ResourceRepository;
pub use user::UserRepository;
