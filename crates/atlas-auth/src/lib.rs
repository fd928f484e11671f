//! # atlas-auth
//!
//! Authentication and authorization building blocks for Atlas.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the password composition policy
//! - `identity`: email and username rules, login input capping
//! - `session`: signed session tokens carried in the session cookie
//! - `ownership`: resolves collections and resources for their owner only

pub mod identity;
pub mod ownership;
pub mod password;
pub mod session;

pub use ownership::{EntityKind, OwnershipGuard};
pub use password::{PasswordHasher, PasswordPolicy};
pub use session::{SessionClaims, SessionTokens};
