//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage settings are absent, unparsable, empty, or incomplete.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// The settings lookup itself failed.
    #[error("failed to load storage settings: {0}")]
    Settings(String),

    /// The remote provider rejected or failed the operation.
    #[error("{provider} storage operation failed: {source}")]
    Provider {
        /// Identifier of the provider that failed.
        provider: &'static str,
        /// Underlying OpenDAL error.
        #[source]
        source: opendal::Error,
    },

    /// No adapter registered for the provider and no default to fall back on.
    #[error("unsupported storage provider: {0}")]
    UnsupportedProvider(String),

    /// Invalid object path.
    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    /// URL that cannot be mapped back to an object key.
    #[error("invalid storage url: {0}")]
    InvalidUrl(String),

    /// Reading the upload content failed.
    #[error("failed to read upload content: {0}")]
    Content(#[from] std::io::Error),
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a settings lookup error.
    #[must_use]
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Wrap an OpenDAL error raised by `provider`.
    #[must_use]
    pub fn provider(provider: &'static str, source: opendal::Error) -> Self {
        Self::Provider { provider, source }
    }

    /// Create an invalid path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Create an invalid url error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// Whether the error was caused by configuration rather than the provider.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::UnsupportedProvider(_))
    }
}
