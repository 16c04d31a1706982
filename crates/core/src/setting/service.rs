//! Setting service implementation.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::error::SettingError;
use super::i18n::{default_i18n, merge_json};
use super::types::{Setting, SettingFields, SettingScope};
use crate::storage::{OssSettingsSource, StorageConfig, StorageError};

/// Repository trait for settings persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait SettingRepository: Send + Sync {
    /// Load the settings record, if one exists.
    fn find_first(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Setting>, SettingError>> + Send;

    /// Insert (when `id` is `None`) or update the settings record.
    fn save(
        &self,
        setting: Setting,
    ) -> impl std::future::Future<Output = Result<Setting, SettingError>> + Send;
}

/// Service for reading and updating site settings.
pub struct SettingService<R: SettingRepository> {
    repo: Arc<R>,
}

impl<R: SettingRepository> std::fmt::Debug for SettingService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingService").finish_non_exhaustive()
    }
}

impl<R: SettingRepository> SettingService<R> {
    /// Create a new setting service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get the settings as seen from `scope`.
    ///
    /// Returns an empty record when nothing has been saved yet.
    pub async fn find_all(&self, scope: SettingScope) -> Result<Setting, SettingError> {
        let setting = self.repo.find_first().await?.unwrap_or_default();
        Ok(setting.view(scope))
    }

    /// Merge `patch` into the stored settings, creating the record if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidValue`] if `oss`, `i18n` or
    /// `globalSetting` are set to something that is not a JSON object.
    pub async fn update(&self, patch: SettingFields) -> Result<Setting, SettingError> {
        validate_patch(&patch)?;

        let mut setting = self.repo.find_first().await?.unwrap_or_default();
        let oss_changed = patch.oss.is_some();
        setting.fields.apply(patch);

        let saved = self.repo.save(setting).await?;
        info!(oss_changed, "settings updated");
        Ok(saved)
    }

    /// Merge the stored translations over the built-in defaults and save.
    ///
    /// Stored translations that are not a JSON object are discarded.
    pub async fn init_i18n(&self) -> Result<Setting, SettingError> {
        let mut setting = self.repo.find_first().await?.unwrap_or_default();

        let stored = match setting.fields.i18n.as_deref().map(serde_json::from_str::<Value>) {
            Some(Ok(value @ Value::Object(_))) => value,
            Some(Ok(_)) => {
                warn!("stored i18n is not a JSON object, resetting to defaults");
                Value::Object(serde_json::Map::new())
            }
            Some(Err(e)) => {
                warn!(error = %e, "stored i18n is not valid JSON, resetting to defaults");
                Value::Object(serde_json::Map::new())
            }
            None => Value::Object(serde_json::Map::new()),
        };

        let mut merged = default_i18n();
        merge_json(&mut merged, stored);
        setting.fields.i18n = Some(merged.to_string());

        self.repo.save(setting).await
    }
}

impl<R: SettingRepository> OssSettingsSource for SettingService<R> {
    async fn load_oss_settings(&self) -> Result<Option<String>, StorageError> {
        let setting = self
            .find_all(SettingScope::Internal)
            .await
            .map_err(|e| StorageError::settings(e.to_string()))?;
        Ok(setting.fields.oss)
    }
}

fn validate_patch(patch: &SettingFields) -> Result<(), SettingError> {
    if let Some(oss) = patch.oss.as_deref().filter(|s| !s.trim().is_empty()) {
        StorageConfig::parse(Some(oss))
            .map_err(|e| SettingError::invalid_value("oss", e.to_string()))?;
    }

    for (field, value) in [
        ("i18n", patch.i18n.as_deref()),
        ("globalSetting", patch.global_setting.as_deref()),
    ] {
        if let Some(raw) = value.filter(|s| !s.trim().is_empty()) {
            match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(_)) => {}
                Ok(_) => return Err(SettingError::invalid_value(field, "expected a JSON object")),
                Err(e) => return Err(SettingError::invalid_value(field, e.to_string())),
            }
        }
    }

    Ok(())
}
