//! Request handlers, grouped by domain.

pub mod auth;
pub mod collections;
pub mod health;
pub mod pages;
pub mod resources;
pub mod suggestions;
