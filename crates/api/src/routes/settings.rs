//! Site settings routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::{AppState, error::ApiResult};
use quill_core::setting::{Setting, SettingFields, SettingScope};

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_public_settings))
        .route(
            "/admin/settings",
            get(get_admin_settings).patch(update_settings),
        )
}

/// GET `/settings`
/// Settings with storage and mail secrets removed.
async fn get_public_settings(State(state): State<AppState>) -> ApiResult<Json<Setting>> {
    let setting = state.settings.find_all(SettingScope::Public).await?;
    Ok(Json(setting))
}

/// GET `/admin/settings`
async fn get_admin_settings(State(state): State<AppState>) -> ApiResult<Json<Setting>> {
    let setting = state.settings.find_all(SettingScope::Admin).await?;
    Ok(Json(setting))
}

/// PATCH `/admin/settings`
/// Merge the given fields into the stored settings.
///
/// A new storage config takes effect on the next upload.
async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingFields>,
) -> ApiResult<Json<Setting>> {
    let setting = state.settings.update(patch).await?;
    Ok(Json(setting.view(SettingScope::Admin)))
}
