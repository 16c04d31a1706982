//! Setting error types.

use thiserror::Error;

/// Setting operation errors.
#[derive(Debug, Error)]
pub enum SettingError {
    /// A stored value could not be processed.
    #[error("invalid setting value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// What was wrong.
        message: String,
    },

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl SettingError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(field: &'static str, msg: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: msg.into(),
        }
    }
}
