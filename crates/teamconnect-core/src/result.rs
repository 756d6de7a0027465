//! Convenience result type alias for TeamConnect.

use crate::error::AppError;

/// A specialized `Result` type for TeamConnect operations.
pub type AppResult<T> = Result<T, AppError>;
