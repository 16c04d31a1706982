//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod files;
pub mod health;
pub mod settings;

/// Creates the API router with all routes.
///
/// Admin routes are mounted without an auth layer.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(settings::routes())
        .merge(files::routes())
}
