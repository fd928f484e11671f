//! Custom Axum extractors.
//!
//! Each one is a pipeline stage that short-circuits with a typed error:
//! [`Payload`] validates bodies, [`ListQuery`] sanitizes query strings,
//! [`Id`] parses path identifiers and [`AuthUser`] resolves the principal.

pub mod path;
pub mod payload;
pub mod query;
pub mod session;

pub use path::Id;
pub use payload::Payload;
pub use query::{ListQuery, SuggestionQuery};
pub use session::{AuthUser, PageUser};
