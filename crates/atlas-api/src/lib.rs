//! # atlas-api
//!
//! HTTP layer for Atlas built on Axum.
//!
//! JSON endpoints live under `/api`; everything else is a server-rendered
//! page shell. Provides the extractors that run the validate, authenticate
//! and authorize stages, the middleware stack, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::{AppState, Stores};
