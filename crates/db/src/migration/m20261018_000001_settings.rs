//! Settings migration.
//!
//! Creates the single-row settings table holding site metadata, i18n and
//! integration secrets (object storage, SMTP).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SETTINGS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS settings;")
            .await?;
        Ok(())
    }
}

// Portable DDL: runs on PostgreSQL and SQLite.
const SETTINGS_SQL: &str = r"
CREATE TABLE settings (
    id UUID PRIMARY KEY,
    system_url VARCHAR(255),
    admin_system_url VARCHAR(255),
    system_title VARCHAR(255),
    system_logo VARCHAR(255),
    system_favicon VARCHAR(255),
    system_footer_info TEXT,
    seo_keyword TEXT,
    seo_desc TEXT,
    baidu_analytics_id VARCHAR(255),
    google_analytics_id VARCHAR(255),
    i18n TEXT,
    global_setting TEXT,
    oss TEXT,
    smtp_host VARCHAR(255),
    smtp_port VARCHAR(255),
    smtp_user VARCHAR(255),
    smtp_pass VARCHAR(255),
    smtp_from_user VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
";
