//! Database seeder for Quill development.
//!
//! Writes a settings row whose storage config points at the local
//! filesystem, so uploads work without cloud credentials. Pair it with
//! `server.uploads_dir` to have the server serve the files.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use quill_core::setting::{SettingFields, SettingScope, SettingService};
use quill_db::SettingRepository;
use quill_shared::AppConfig;

/// Directory uploads are written to when none is configured.
const DEFAULT_UPLOADS_DIR: &str = "./uploads";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    println!("Connecting to database...");
    let db = quill_db::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let settings = SettingService::new(Arc::new(SettingRepository::new(db)));

    println!("Seeding settings...");
    let current = settings.find_all(SettingScope::Internal).await?;
    if current.fields.oss.is_some() {
        println!("  Storage already configured, skipping...");
        return Ok(());
    }

    let dir = config
        .server
        .uploads_dir
        .as_deref()
        .unwrap_or(DEFAULT_UPLOADS_DIR);
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {dir}"))?;
    let root = std::fs::canonicalize(dir)?;

    let oss = json!({
        "type": "local",
        "root": root,
        "baseUrl": "/uploads",
    });

    settings
        .update(SettingFields {
            system_title: Some("Quill".to_string()),
            oss: Some(oss.to_string()),
            ..Default::default()
        })
        .await?;
    println!("  Local storage configured at {}", root.display());

    settings.init_i18n().await?;

    println!("Seeding complete!");
    Ok(())
}
