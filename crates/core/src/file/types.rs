//! File domain types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// File ID.
    pub id: Uuid,
    /// Name the file was uploaded with.
    pub original_name: String,
    /// Object key in the storage provider.
    pub key: String,
    /// MIME type reported by the uploader.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Public URL returned by the storage provider.
    pub url: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

/// Input for persisting a file record.
#[derive(Debug, Clone)]
pub struct CreateFileInput {
    /// File ID.
    pub id: Uuid,
    /// Original file name.
    pub original_name: String,
    /// Object key.
    pub key: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Public URL.
    pub url: String,
}

/// An upload as received from a client.
#[derive(Debug, Clone)]
pub struct UploadFileInput {
    /// Original file name.
    pub original_name: String,
    /// MIME type; `application/octet-stream` when unknown.
    pub content_type: String,
    /// File content.
    pub content: Bytes,
}

/// Filters for listing files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFilter {
    /// Case-insensitive substring of the original name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// MIME type prefix, e.g. `image/`.
    #[serde(default)]
    pub content_type: Option<String>,
}
