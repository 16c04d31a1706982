//! File upload and management routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};
use quill_core::file::{FileFilter, FileRecord, UploadFileInput};
use quill_shared::{
    AppError,
    types::{PageRequest, PageResponse},
};

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Creates the file routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(list_files).post(upload_file))
        .route("/files/{id}", get(get_file).delete(delete_file))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing files.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Case-insensitive substring of the original name.
    pub original_name: Option<String>,
    /// MIME type prefix.
    pub content_type: Option<String>,
}

impl ListFilesQuery {
    fn into_parts(self) -> (FileFilter, PageRequest) {
        let defaults = PageRequest::default();
        let page = PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
        .normalized();

        let filter = FileFilter {
            original_name: self.original_name,
            content_type: self.content_type,
        };

        (filter, page)
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/files`
/// Upload the multipart field `file` through the configured storage provider.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<FileRecord>)> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let content = field.bytes().await?;

        upload = Some(UploadFileInput {
            original_name,
            content_type,
            content,
        });
        break;
    }

    let input = upload.ok_or_else(|| {
        ApiError(AppError::Validation(format!(
            "missing multipart field `{FILE_FIELD}`"
        )))
    })?;

    let record = state.files.upload(input).await?;
    info!(file_id = %record.id, url = %record.url, "upload stored");

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET `/files`
async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<ListFilesQuery>,
) -> ApiResult<Json<PageResponse<FileRecord>>> {
    let (filter, page) = query.into_parts();
    let files = state.files.list(&filter, &page).await?;
    Ok(Json(files))
}

/// GET `/files/{id}`
async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FileRecord>> {
    let record = state.files.find(id).await?;
    Ok(Json(record))
}

/// DELETE `/files/{id}`
/// Remove the stored object, then the record.
async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.files.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
