//! Integration tests for Setting repository.

mod common;

use quill_core::setting::{Setting, SettingFields, SettingRepository as _};
use quill_db::SettingRepository;

fn setting(title: &str) -> Setting {
    Setting {
        fields: SettingFields {
            system_title: Some(title.to_string()),
            oss: Some(r#"{"type":"local","root":"/tmp/quill"}"#.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_find_first_empty() {
    let db = common::setup_db().await;
    let repo = SettingRepository::new(db);

    let found = repo.find_first().await.expect("Failed to query settings");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_save_inserts_new_record() {
    let db = common::setup_db().await;
    let repo = SettingRepository::new(db);

    let saved = repo.save(setting("Quill")).await.expect("Failed to save");
    assert!(saved.id.is_some());
    assert!(saved.created_at.is_some());
    assert_eq!(saved.fields.system_title.as_deref(), Some("Quill"));

    let found = repo
        .find_first()
        .await
        .expect("Failed to query settings")
        .expect("Setting should exist");
    assert_eq!(found.id, saved.id);
    assert_eq!(found.fields, saved.fields);
}

#[tokio::test]
async fn test_save_updates_existing_record() {
    let db = common::setup_db().await;
    let repo = SettingRepository::new(db);

    let mut saved = repo.save(setting("Quill")).await.expect("Failed to save");
    let id = saved.id;
    saved.fields.system_title = Some("Renamed".to_string());
    saved.fields.oss = None;

    let updated = repo.save(saved).await.expect("Failed to update");
    assert_eq!(updated.id, id);
    assert_eq!(updated.fields.system_title.as_deref(), Some("Renamed"));
    assert!(updated.fields.oss.is_none());

    let found = repo
        .find_first()
        .await
        .expect("Failed to query settings")
        .expect("Setting should exist");
    assert_eq!(found.id, id);
    assert_eq!(found.fields.system_title.as_deref(), Some("Renamed"));
}
