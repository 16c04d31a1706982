//! File error types.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// File operation errors.
#[derive(Debug, Error)]
pub enum FileError {
    /// File record not found.
    #[error("file not found: {0}")]
    NotFound(Uuid),

    /// Upload is larger than allowed.
    #[error("file too large: {size} bytes exceeds maximum {max} bytes")]
    TooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Upload has no content.
    #[error("file is empty")]
    Empty,

    /// Upload has no usable name.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl FileError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Create a file too large error.
    #[must_use]
    pub fn too_large(size: u64, max: u64) -> Self {
        Self::TooLarge { size, max }
    }
}
