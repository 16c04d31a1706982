//! Files migration.
//!
//! Creates the files table recording every object uploaded through the
//! storage layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(FILES_SQL).await?;
        db.execute_unprepared(FILES_INDEXES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS files;").await?;
        Ok(())
    }
}

const FILES_SQL: &str = r"
CREATE TABLE files (
    id UUID PRIMARY KEY,
    original_name VARCHAR(255) NOT NULL,
    storage_key VARCHAR(512) NOT NULL,
    content_type VARCHAR(255) NOT NULL,
    size BIGINT NOT NULL CHECK (size >= 0),
    url TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
";

const FILES_INDEXES_SQL: &str =
    "CREATE INDEX idx_files_created ON files(created_at DESC);";
