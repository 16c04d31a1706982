//! `SeaORM` Entity for settings table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub system_url: Option<String>,
    pub admin_system_url: Option<String>,
    pub system_title: Option<String>,
    pub system_logo: Option<String>,
    pub system_favicon: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub system_footer_info: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub seo_keyword: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub seo_desc: Option<String>,
    pub baidu_analytics_id: Option<String>,
    pub google_analytics_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub i18n: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub global_setting: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub oss: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub smtp_from_user: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
