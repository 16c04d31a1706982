//! File service implementation.

use std::sync::Arc;

use chrono::Utc;
use quill_shared::types::{PageRequest, PageResponse};
use tracing::{error, info};
use uuid::Uuid;

use super::error::FileError;
use super::types::{CreateFileInput, FileFilter, FileRecord, UploadFileInput};
use crate::storage::{OssSettingsSource, StorageFacade};

/// Repository trait for file record persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait FileRepository: Send + Sync {
    /// Create a new file record.
    fn create(
        &self,
        input: CreateFileInput,
    ) -> impl std::future::Future<Output = Result<FileRecord, FileError>> + Send;

    /// Find file by ID.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<FileRecord>, FileError>> + Send;

    /// List files matching `filter`, newest first. Returns the page and the total count.
    fn list(
        &self,
        filter: &FileFilter,
        page: &PageRequest,
    ) -> impl std::future::Future<Output = Result<(Vec<FileRecord>, u64), FileError>> + Send;

    /// Delete file record by ID.
    fn delete(&self, id: Uuid) -> impl std::future::Future<Output = Result<bool, FileError>> + Send;
}

/// File service: uploads through the storage facade and keeps records.
pub struct FileService<R: FileRepository, S: OssSettingsSource> {
    repo: Arc<R>,
    storage: StorageFacade<S>,
    max_file_size: u64,
}

impl<R: FileRepository, S: OssSettingsSource> FileService<R, S> {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new file service.
    #[must_use]
    pub fn new(repo: Arc<R>, storage: StorageFacade<S>) -> Self {
        Self {
            repo,
            storage,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Upload a file and record it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is empty or larger than the limit
    /// - The storage settings are missing or the provider fails
    /// - The record cannot be saved (the uploaded object is removed again)
    pub async fn upload(&self, input: UploadFileInput) -> Result<FileRecord, FileError> {
        let size = input.content.len() as u64;
        if size == 0 {
            return Err(FileError::Empty);
        }
        if size > self.max_file_size {
            return Err(FileError::too_large(size, self.max_file_size));
        }

        let id = Uuid::new_v4();
        let key = generate_storage_key(id, &input.original_name)?;

        let url = self.storage.put_file(&key, input.content).await?;

        let create_input = CreateFileInput {
            id,
            original_name: input.original_name,
            key,
            content_type: input.content_type,
            size: i64::try_from(size).unwrap_or(i64::MAX),
            url: url.clone(),
        };

        match self.repo.create(create_input).await {
            Ok(record) => {
                info!(file_id = %record.id, key = %record.key, size, "file uploaded");
                Ok(record)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete_file(&url).await {
                    error!(error = %cleanup, url = %url, "failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    /// List files.
    pub async fn list(
        &self,
        filter: &FileFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<FileRecord>, FileError> {
        let (items, total) = self.repo.list(filter, page).await?;
        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }

    /// Get a file by ID.
    pub async fn find(&self, id: Uuid) -> Result<FileRecord, FileError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FileError::NotFound(id))
    }

    /// Delete a file from storage, then its record.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::NotFound`] for unknown IDs. If the storage
    /// provider fails the record is kept.
    pub async fn delete(&self, id: Uuid) -> Result<(), FileError> {
        let record = self.find(id).await?;

        self.storage.delete_file(&record.url).await?;

        if !self.repo.delete(id).await? {
            return Err(FileError::NotFound(id));
        }

        info!(file_id = %id, key = %record.key, "file deleted");
        Ok(())
    }
}

/// Generate the storage key for an upload.
///
/// Format: `{YYYY-MM-DD}/{first 8 chars of id}-{sanitized_filename}`
fn generate_storage_key(id: Uuid, original_name: &str) -> Result<String, FileError> {
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(FileError::InvalidName(original_name.to_string()));
    }

    let simple = id.simple().to_string();
    Ok(format!(
        "{}/{}-{}",
        Utc::now().format("%Y-%m-%d"),
        &simple[..8],
        sanitize_filename(name)
    ))
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::storage::normalize_key;
    use proptest::prelude::*;

    // Property: Generated keys are always valid storage paths made of safe characters.
    proptest! {
        #[test]
        fn prop_storage_key_is_safe(filename in "[^/\\\\]{1,40}") {
            prop_assume!(!filename.trim().is_empty() && filename.trim() != "." && filename.trim() != "..");
            let key = generate_storage_key(Uuid::new_v4(), &filename).expect("key");

            prop_assert_eq!(normalize_key(&key).expect("valid path"), key.clone());
            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 2);
            for c in parts[1].chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in key: {}", c);
            }
        }
    }
}
