//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for settings and files
//! - Error to response mapping
//! - Router assembly with the tower-http middleware stack

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use quill_core::file::FileService;
use quill_core::setting::SettingService;
use quill_core::storage::StorageFacade;
use quill_db::{FileRepository, SettingRepository};
use quill_shared::config::ServerConfig;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Settings service backed by the database.
pub type Settings = SettingService<SettingRepository>;

/// File service storing through the settings-driven storage facade.
pub type Files = FileService<FileRepository, Settings>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Site settings.
    pub settings: Arc<Settings>,
    /// File uploads and records.
    pub files: Arc<Files>,
}

impl AppState {
    /// Wire the services over a database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, max_file_size: u64) -> Self {
        let settings = Arc::new(SettingService::new(Arc::new(SettingRepository::new(
            db.clone(),
        ))));
        let files = FileService::new(
            Arc::new(FileRepository::new(db.clone())),
            StorageFacade::new(settings.clone()),
        )
        .with_max_file_size(max_file_size);

        Self {
            db: Arc::new(db),
            settings,
            files: Arc::new(files),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let body_limit = usize::try_from(config.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let mut router = Router::new().nest("/api/v1", routes::api_routes());

    if let Some(dir) = config.uploads_dir.as_deref() {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
