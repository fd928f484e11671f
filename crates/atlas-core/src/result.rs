//! Convenience result type alias for Atlas.

use crate::error::AppError;

/// A specialized `Result` type for Atlas operations.
pub type AppResult<T> = Result<T, AppError>;
