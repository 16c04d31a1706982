//! Provider registry: maps `type` discriminators to client factories.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::aliyun::AliyunOssClient;
use super::client::StorageClient;
use super::config::StorageConfig;
use super::error::StorageError;
use super::local::LocalFsClient;

/// Builds a client for one provider from the resolved configuration.
pub type ClientFactory =
    Arc<dyn Fn(&StorageConfig) -> Result<Box<dyn StorageClient>, StorageError> + Send + Sync>;

/// Identifier of the Aliyun OSS provider, the built-in default.
pub const ALIYUN: &str = "aliyun";
/// Identifier of the local filesystem provider.
pub const LOCAL: &str = "local";

/// Registry of storage providers with one designated default.
#[derive(Clone)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ClientFactory>,
    default: Option<String>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.factories.keys().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProviderRegistry {
    /// Registry with no providers and no default.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
            default: None,
        }
    }

    /// Registry with the built-in adapters; `aliyun` is the default.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .register(ALIYUN, |config| {
                Ok(Box::new(AliyunOssClient::from_config(config)?) as Box<dyn StorageClient>)
            })
            .register(LOCAL, |config| {
                Ok(Box::new(LocalFsClient::from_config(config)?) as Box<dyn StorageClient>)
            })
            .with_default(ALIYUN)
    }

    /// Register a factory under `name` (case-insensitive).
    #[must_use]
    pub fn register<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&StorageConfig) -> Result<Box<dyn StorageClient>, StorageError>
            + Send
            + Sync
            + 'static,
    {
        self.factories
            .insert(normalize(name), Arc::new(factory) as ClientFactory);
        self
    }

    /// Designate the provider used when `type` is absent or unknown.
    #[must_use]
    pub fn with_default(mut self, name: &str) -> Self {
        self.default = Some(normalize(name));
        self
    }

    /// Registered provider identifiers.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Default provider identifier.
    #[must_use]
    pub fn default_provider(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Resolve the provider for a `type` discriminator.
    ///
    /// The lookup is case-insensitive. Absent or unknown types fall back
    /// to the default provider.
    pub fn select(
        &self,
        provider_type: Option<&str>,
    ) -> Result<(&str, &ClientFactory), StorageError> {
        let requested = provider_type.map(normalize);

        if let Some(name) = requested.as_deref() {
            if let Some((key, factory)) = self.factories.get_key_value(name) {
                return Ok((key.as_str(), factory));
            }
        }

        let fallback = self
            .default
            .as_deref()
            .and_then(|name| self.factories.get_key_value(name))
            .ok_or_else(|| {
                StorageError::UnsupportedProvider(
                    requested.clone().unwrap_or_else(|| "<unset>".to_string()),
                )
            })?;

        if let Some(name) = requested.as_deref() {
            warn!(
                requested = %name,
                fallback = %fallback.0,
                "unknown storage provider, falling back to default"
            );
        }

        Ok((fallback.0.as_str(), fallback.1))
    }

    /// Select and build a client for `config`.
    pub fn build(&self, config: &StorageConfig) -> Result<Box<dyn StorageClient>, StorageError> {
        let (_, factory) = self.select(config.provider_type())?;
        factory(config)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Selection depends only on the lower-cased discriminator.
    proptest! {
        #[test]
        fn prop_selection_is_case_insensitive(name in "[a-zA-Z-]{0,16}") {
            let registry = ProviderRegistry::builtin();
            let upper = name.to_uppercase();
            let lower = name.to_lowercase();

            let (a, _) = registry.select(Some(&upper)).expect("selection");
            let (b, _) = registry.select(Some(&lower)).expect("selection");
            prop_assert_eq!(a, b);

            let expected = if lower == LOCAL { LOCAL } else { ALIYUN };
            prop_assert_eq!(a, expected);
        }
    }
}
