//! Convenience result type alias for BrainBox.

use crate::error::AppError;

/// A specialized `Result` type for BrainBox operations.
pub type AppResult<T> = Result<T, AppError>;
