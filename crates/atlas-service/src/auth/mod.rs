//! Account registration, login, sessions, and self-service profile changes.

pub mod service;

pub use service::AuthService;
