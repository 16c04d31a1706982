//! Site settings.
//!
//! A single settings record holds the public site metadata, the i18n
//! dictionary, and the protected integration secrets (`oss`, `smtp*`).

mod error;
mod i18n;
mod service;
mod types;

pub use error::SettingError;
pub use i18n::{default_i18n, merge_json};
pub use service::{SettingRepository, SettingService};
pub use types::{Setting, SettingFields, SettingScope};
