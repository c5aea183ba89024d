//! Convenience result type alias for the plugin host.

use crate::error::AppError;

/// A specialized `Result` type for plugin host operations.
pub type AppResult<T> = Result<T, AppError>;
