//! Setting repository for database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entities::settings;
use quill_core::setting::{
    Setting, SettingError, SettingFields, SettingRepository as SettingRepoTrait,
};

/// Setting repository implementation.
#[derive(Debug, Clone)]
pub struct SettingRepository {
    db: DatabaseConnection,
}

impl SettingRepository {
    /// Create a new setting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SettingRepoTrait for SettingRepository {
    async fn find_first(&self) -> Result<Option<Setting>, SettingError> {
        let model = settings::Entity::find()
            .order_by_asc(settings::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| SettingError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn save(&self, setting: Setting) -> Result<Setting, SettingError> {
        let now = Utc::now();
        let f = setting.fields;

        let mut active_model = settings::ActiveModel {
            id: Set(setting.id.unwrap_or_else(Uuid::new_v4)),
            system_url: Set(f.system_url),
            admin_system_url: Set(f.admin_system_url),
            system_title: Set(f.system_title),
            system_logo: Set(f.system_logo),
            system_favicon: Set(f.system_favicon),
            system_footer_info: Set(f.system_footer_info),
            seo_keyword: Set(f.seo_keyword),
            seo_desc: Set(f.seo_desc),
            baidu_analytics_id: Set(f.baidu_analytics_id),
            google_analytics_id: Set(f.google_analytics_id),
            i18n: Set(f.i18n),
            global_setting: Set(f.global_setting),
            oss: Set(f.oss),
            smtp_host: Set(f.smtp_host),
            smtp_port: Set(f.smtp_port),
            smtp_user: Set(f.smtp_user),
            smtp_pass: Set(f.smtp_pass),
            smtp_from_user: Set(f.smtp_from_user),
            created_at: Set(setting.created_at.unwrap_or(now).into()),
            updated_at: Set(now.into()),
        };

        let model = if setting.id.is_some() {
            // created_at never changes after insert
            active_model.created_at = sea_orm::ActiveValue::NotSet;
            active_model.update(&self.db).await
        } else {
            active_model.insert(&self.db).await
        }
        .map_err(|e| SettingError::repository(e.to_string()))?;

        debug!(setting_id = %model.id, "settings row saved");
        Ok(to_domain(model))
    }
}

/// Convert database model to domain setting.
fn to_domain(model: settings::Model) -> Setting {
    Setting {
        id: Some(model.id),
        fields: SettingFields {
            system_url: model.system_url,
            admin_system_url: model.admin_system_url,
            system_title: model.system_title,
            system_logo: model.system_logo,
            system_favicon: model.system_favicon,
            system_footer_info: model.system_footer_info,
            seo_keyword: model.seo_keyword,
            seo_desc: model.seo_desc,
            baidu_analytics_id: model.baidu_analytics_id,
            google_analytics_id: model.google_analytics_id,
            i18n: model.i18n,
            global_setting: model.global_setting,
            oss: model.oss,
            smtp_host: model.smtp_host,
            smtp_port: model.smtp_port,
            smtp_user: model.smtp_user,
            smtp_pass: model.smtp_pass,
            smtp_from_user: model.smtp_from_user,
        },
        created_at: Some(model.created_at.with_timezone(&Utc)),
        updated_at: Some(model.updated_at.with_timezone(&Utc)),
    }
}
