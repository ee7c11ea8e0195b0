//! Convenience result type alias for Authgate.

use crate::error::AppError;

/// A specialized `Result` type for Authgate operations.
pub type AppResult<T> = Result<T, AppError>;
