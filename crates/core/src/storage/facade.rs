//! Storage facade: resolves configuration and delegates to the selected adapter.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::client::{FileContent, StorageClient};
use super::error::StorageError;
use super::registry::ProviderRegistry;
use super::resolver::{ConfigResolver, OssSettingsSource};

/// Entry point for uploading and deleting files.
///
/// Every call re-reads the `oss` setting and builds a fresh client, so a
/// configuration change applies to the next call without a restart.
#[derive(Debug)]
pub struct StorageFacade<S> {
    resolver: ConfigResolver<S>,
    registry: Arc<ProviderRegistry>,
}

impl<S> Clone for StorageFacade<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: OssSettingsSource> StorageFacade<S> {
    /// Create a facade using the built-in providers.
    #[must_use]
    pub fn new(settings: Arc<S>) -> Self {
        Self::with_registry(settings, ProviderRegistry::builtin())
    }

    /// Create a facade with a custom provider registry.
    #[must_use]
    pub fn with_registry(settings: Arc<S>, registry: ProviderRegistry) -> Self {
        Self {
            resolver: ConfigResolver::new(settings),
            registry: Arc::new(registry),
        }
    }

    /// Provider registry in use.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    async fn client(&self) -> Result<Box<dyn StorageClient>, StorageError> {
        let config = self.resolver.resolve().await?;
        let client = self.registry.build(&config)?;
        debug!(provider = client.provider(), "storage client resolved");
        Ok(client)
    }

    /// Upload `content` to `path` and return the public URL.
    ///
    /// # Errors
    ///
    /// Configuration errors are returned before any provider call; provider
    /// failures are passed through unchanged.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn put_file(
        &self,
        path: &str,
        content: impl Into<FileContent> + Send,
    ) -> Result<String, StorageError> {
        let content = content.into();
        let client = self.client().await?;
        client.put_file(path, content).await
    }

    /// Delete the object behind `url`.
    ///
    /// Deleting an object that no longer exists succeeds for the built-in
    /// providers.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn delete_file(&self, url: &str) -> Result<(), StorageError> {
        let client = self.client().await?;
        client.delete_file(url).await
    }
}
