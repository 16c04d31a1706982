//! Quill API Server
//!
//! Main entry point for the Quill backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quill_api::{AppState, create_router};
use quill_db::connect;
use quill_db::migration::{Migrator, MigratorTrait};
use quill_shared::AppConfig;
use quill_shared::config::LoggingConfig;

const DEFAULT_LOG_FILTER: &str = "quill=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let db = connect(&config.database)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    let state = AppState::new(db, config.server.max_upload_bytes);

    // Translations are merged over the built-in defaults once per start
    state
        .settings
        .init_i18n()
        .await
        .context("failed to initialise translations")?;

    if let Some(dir) = &config.server.uploads_dir {
        info!(dir = %dir, "Serving local uploads at /uploads");
    }

    let app = create_router(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
