//! # atlas-service
//!
//! Business logic for Atlas. Each service validates its input, confirms
//! ownership through the [`OwnershipGuard`](atlas_auth::OwnershipGuard),
//! and only then touches the store.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod bootstrap;
pub mod collection;
pub mod context;
pub mod fields;
pub mod resource;
pub mod suggestion;

pub use auth::AuthService;
pub use bootstrap::{BootstrapOutcome, bootstrap_admin};
pub use collection::CollectionService;
pub use context::RequestContext;
pub use resource::ResourceService;
pub use suggestion::{Suggestion, SuggestionService};
