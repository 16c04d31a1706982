//! Setting domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is asking for the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingScope {
    /// Anonymous visitors: protected fields are stripped.
    Public,
    /// In-process callers such as the storage layer.
    Internal,
    /// Admin console.
    Admin,
}

impl SettingScope {
    /// Whether protected fields are visible in this scope.
    #[must_use]
    pub const fn sees_protected(self) -> bool {
        matches!(self, Self::Internal | Self::Admin)
    }
}

/// Editable setting values. `None` means unset (or, in a patch, unchanged).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingFields {
    /// Public site URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_url: Option<String>,
    /// Admin console URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_system_url: Option<String>,
    /// Site title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_title: Option<String>,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_logo: Option<String>,
    /// Favicon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_favicon: Option<String>,
    /// Footer HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_footer_info: Option<String>,
    /// SEO keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_keyword: Option<String>,
    /// SEO description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_desc: Option<String>,
    /// Baidu analytics id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baidu_analytics_id: Option<String>,
    /// Google analytics id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    /// JSON dictionary of UI translations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n: Option<String>,
    /// Free-form JSON used by the client theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_setting: Option<String>,
    /// JSON object-storage configuration. Protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oss: Option<String>,
    /// SMTP host. Protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,
    /// SMTP port. Protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<String>,
    /// SMTP user. Protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_user: Option<String>,
    /// SMTP password. Protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_pass: Option<String>,
    /// Sender address. Protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_from_user: Option<String>,
}

impl SettingFields {
    /// Copy of these fields with the protected ones cleared.
    #[must_use]
    pub fn public_view(&self) -> Self {
        Self {
            oss: None,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_pass: None,
            smtp_from_user: None,
            ..self.clone()
        }
    }

    /// Overwrite every field that is set in `patch`.
    pub fn apply(&mut self, patch: Self) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.system_url, patch.system_url);
        take(&mut self.admin_system_url, patch.admin_system_url);
        take(&mut self.system_title, patch.system_title);
        take(&mut self.system_logo, patch.system_logo);
        take(&mut self.system_favicon, patch.system_favicon);
        take(&mut self.system_footer_info, patch.system_footer_info);
        take(&mut self.seo_keyword, patch.seo_keyword);
        take(&mut self.seo_desc, patch.seo_desc);
        take(&mut self.baidu_analytics_id, patch.baidu_analytics_id);
        take(&mut self.google_analytics_id, patch.google_analytics_id);
        take(&mut self.i18n, patch.i18n);
        take(&mut self.global_setting, patch.global_setting);
        take(&mut self.oss, patch.oss);
        take(&mut self.smtp_host, patch.smtp_host);
        take(&mut self.smtp_port, patch.smtp_port);
        take(&mut self.smtp_user, patch.smtp_user);
        take(&mut self.smtp_pass, patch.smtp_pass);
        take(&mut self.smtp_from_user, patch.smtp_from_user);
    }
}

/// The persisted settings record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    /// Record id; `None` until first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Setting values.
    #[serde(flatten)]
    pub fields: SettingFields,
    /// Created at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last updated at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Setting {
    /// The record as seen from `scope`.
    #[must_use]
    pub fn view(&self, scope: SettingScope) -> Self {
        if scope.sees_protected() {
            self.clone()
        } else {
            Self {
                fields: self.fields.public_view(),
                ..self.clone()
            }
        }
    }
}
