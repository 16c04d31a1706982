//! Resolves the active storage configuration from persisted settings.

use std::future::Future;
use std::sync::Arc;

use super::config::StorageConfig;
use super::error::StorageError;

/// Source of the raw `oss` setting.
///
/// Implemented by the settings service; `Ok(None)` means no settings
/// record or no `oss` value.
pub trait OssSettingsSource: Send + Sync {
    /// Load the raw JSON text of the `oss` setting.
    fn load_oss_settings(
        &self,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;
}

/// Reads and parses the storage configuration on every call.
#[derive(Debug)]
pub struct ConfigResolver<S> {
    source: Arc<S>,
}

impl<S> Clone for ConfigResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: OssSettingsSource> ConfigResolver<S> {
    /// Create a resolver over a settings source.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch and parse the current configuration. Nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] when the setting is absent or
    /// invalid, and [`StorageError::Settings`] when the lookup fails.
    pub async fn resolve(&self) -> Result<StorageConfig, StorageError> {
        let raw = self.source.load_oss_settings().await?;
        StorageConfig::parse(raw.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedSource(Mutex<Option<String>>);

    impl OssSettingsSource for FixedSource {
        async fn load_oss_settings(&self) -> Result<Option<String>, StorageError> {
            Ok(self.0.lock().expect("lock").clone())
        }
    }

    struct FailingSource;

    impl OssSettingsSource for FailingSource {
        async fn load_oss_settings(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::settings("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_resolve_reads_fresh_value_each_call() {
        let source = Arc::new(FixedSource(Mutex::new(None)));
        let resolver = ConfigResolver::new(source.clone());

        assert!(matches!(
            resolver.resolve().await,
            Err(StorageError::Configuration(_))
        ));

        *source.0.lock().expect("lock") = Some(r#"{"type":"local","root":"/tmp"}"#.into());
        let config = resolver.resolve().await.expect("config");
        assert_eq!(config.provider_type(), Some("local"));
    }

    #[tokio::test]
    async fn test_resolve_propagates_lookup_failure() {
        let resolver = ConfigResolver::new(Arc::new(FailingSource));
        assert!(matches!(
            resolver.resolve().await,
            Err(StorageError::Settings(_))
        ));
    }
}
