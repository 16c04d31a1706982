//! Mapping of domain errors to HTTP responses.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use quill_core::file::FileError;
use quill_core::setting::SettingError;
use quill_core::storage::StorageError;
use quill_shared::AppError;

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from route handlers.
///
/// Renders as `{"error": CODE, "message": ...}`. Server-side failures are
/// logged and reported with a generic message.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            error!(error = %self.0, "request failed");
            match self.0 {
                AppError::ExternalService(_) => "Storage provider request failed".to_string(),
                _ => "An error occurred".to_string(),
            }
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let msg = err.to_string();
        Self(match err {
            StorageError::Configuration(_) | StorageError::UnsupportedProvider(_) => {
                AppError::Configuration(msg)
            }
            StorageError::InvalidPath(_) | StorageError::InvalidUrl(_) => {
                AppError::Validation(msg)
            }
            StorageError::Provider { .. } => AppError::ExternalService(msg),
            StorageError::Settings(_) => AppError::Database(msg),
            StorageError::Content(_) => AppError::Internal(msg),
        })
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        let msg = err.to_string();
        match err {
            FileError::NotFound(_) => Self(AppError::NotFound(msg)),
            FileError::TooLarge { .. } => Self(AppError::PayloadTooLarge(msg)),
            FileError::Empty | FileError::InvalidName(_) => Self(AppError::Validation(msg)),
            FileError::Storage(e) => e.into(),
            FileError::Repository(_) => Self(AppError::Database(msg)),
        }
    }
}

impl From<SettingError> for ApiError {
    fn from(err: SettingError) -> Self {
        let msg = err.to_string();
        Self(match err {
            SettingError::InvalidValue { .. } => AppError::Validation(msg),
            SettingError::Repository(_) => AppError::Database(msg),
        })
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        let msg = err.body_text();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self(AppError::PayloadTooLarge(msg))
        } else {
            Self(AppError::Validation(msg))
        }
    }
}
