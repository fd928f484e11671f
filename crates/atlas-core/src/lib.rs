//! # atlas-core
//!
//! Core crate for Atlas. Contains configuration schemas, typed
//! identifiers, sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Atlas crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
