use sea_orm::{ActiveModelTrait, Set};

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::entity::prelude::*;
use crate::models::courses::entities::CourseKey;
use crate::models::turnitin::entities::NewSubmissionMapping;
use crate::storage::{CourseDirectory, Storage, UserDirectory};

const ORA_ID: &str = "0a966646-83f9-4ce6-aa47-71e07baf4e30";
const COURSE: &str = "course-v1:edX+DemoX+Demo_Course";

pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::new_async(&config).await.unwrap()
}

async fn seed_user(storage: &SeaOrmStorage, id: i64, full_name: Option<&str>, is_staff: bool) {
    UserActiveModel {
        id: Set(id),
        username: Set(format!("user{id}")),
        email: Set(format!("user{id}@example.com")),
        full_name: Set(full_name.map(str::to_string)),
        is_staff: Set(is_staff),
        is_active: Set(true),
        created_at: Set(0),
    }
    .insert(&storage.db)
    .await
    .unwrap();
}

async fn seed_course(storage: &SeaOrmStorage, settings: Option<&str>) {
    CourseOverviewActiveModel {
        id: Set(COURSE.to_string()),
        display_name: Set("Demo Course".to_string()),
        other_course_settings: Set(settings.map(str::to_string)),
        created_at: Set(0),
    }
    .insert(&storage.db)
    .await
    .unwrap();
}

fn mapping(turnitin_id: &str) -> NewSubmissionMapping {
    NewSubmissionMapping {
        user_id: 1,
        ora_submission_id: Some(ORA_ID.to_string()),
        turnitin_submission_id: turnitin_id.to_string(),
        file_name: Some(format!("{turnitin_id}.txt")),
    }
}

#[test]
fn test_build_database_url() {
    assert_eq!(
        SeaOrmStorage::build_database_url(":memory:").unwrap(),
        "sqlite://:memory:?mode=rwc"
    );
    assert_eq!(
        SeaOrmStorage::build_database_url("bridge.db").unwrap(),
        "sqlite://bridge.db?mode=rwc"
    );
    assert!(SeaOrmStorage::build_database_url("postgres://localhost/bridge").is_ok());
    assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
}

#[tokio::test]
async fn test_mappings_listed_in_creation_order() {
    let storage = memory_storage().await;
    seed_user(&storage, 1, Some("Jane Doe"), false).await;

    for id in ["tii-a", "tii-b", "tii-c"] {
        storage.create_submission_mapping(mapping(id)).await.unwrap();
    }
    let mut other = mapping("tii-other");
    other.ora_submission_id = Some("f3c1a6a2-8f64-4a3f-9d9b-2f4f1c7e0c11".to_string());
    storage.create_submission_mapping(other).await.unwrap();

    let listed = storage.list_submission_mappings(ORA_ID).await.unwrap();
    let ids: Vec<&str> = listed
        .iter()
        .map(|m| m.turnitin_submission_id.as_str())
        .collect();
    assert_eq!(ids, vec!["tii-a", "tii-b", "tii-c"]);
    assert!(listed.iter().all(|m| m.turnitin_submission_pdf_id.is_none()));
}

#[tokio::test]
async fn test_list_unknown_submission_is_empty() {
    let storage = memory_storage().await;
    assert!(
        storage
            .list_submission_mappings(ORA_ID)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_attach_report_artifact() {
    let storage = memory_storage().await;
    seed_user(&storage, 1, None, false).await;
    let created = storage.create_submission_mapping(mapping("tii-a")).await.unwrap();

    assert!(
        storage
            .attach_report_artifact(created.id, "pdf-1")
            .await
            .unwrap()
    );
    assert!(!storage.attach_report_artifact(9999, "pdf-2").await.unwrap());

    let listed = storage.list_submission_mappings(ORA_ID).await.unwrap();
    assert_eq!(listed[0].turnitin_submission_pdf_id.as_deref(), Some("pdf-1"));
    assert_eq!(listed[0].turnitin_submission_id, "tii-a");
}

#[tokio::test]
async fn test_user_lookup_by_anonymous_id() {
    let storage = memory_storage().await;
    seed_user(&storage, 1, Some("Jane Doe"), false).await;
    AnonymousUserIdActiveModel {
        anonymous_user_id: Set("anon-1".to_string()),
        user_id: Set(1),
        course_id: Set(Some(COURSE.to_string())),
    }
    .insert(&storage.db)
    .await
    .unwrap();

    let user = storage.user_by_anonymous_id("anon-1").await.unwrap().unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.full_name, "Jane Doe");
    assert!(storage.user_by_anonymous_id("anon-2").await.unwrap().is_none());
    assert!(storage.user_by_id(2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_course_settings_and_roles() {
    let storage = memory_storage().await;
    seed_user(&storage, 1, None, false).await;
    seed_user(&storage, 2, None, false).await;
    seed_course(&storage, Some(r#"{"ENABLE_TURNITIN_SUBMISSION": true}"#)).await;
    CourseAccessRoleActiveModel {
        user_id: Set(1),
        course_id: Set(COURSE.to_string()),
        role: Set("instructor".to_string()),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .unwrap();

    let key: CourseKey = COURSE.parse().unwrap();
    let missing: CourseKey = "course-v1:edX+Other+2024".parse().unwrap();

    assert!(storage.course_exists(&key).await.unwrap());
    assert!(!storage.course_exists(&missing).await.unwrap());

    let settings = storage.course_settings(&key).await.unwrap().unwrap();
    assert_eq!(settings["ENABLE_TURNITIN_SUBMISSION"], true);
    assert!(storage.course_settings(&missing).await.unwrap().is_none());

    assert!(storage.has_staff_access(1, &key).await.unwrap());
    assert!(!storage.has_staff_access(2, &key).await.unwrap());
}

#[tokio::test]
async fn test_malformed_course_settings_become_empty_object() {
    let storage = memory_storage().await;
    seed_course(&storage, Some("not json")).await;
    let key: CourseKey = COURSE.parse().unwrap();
    let settings = storage.course_settings(&key).await.unwrap().unwrap();
    assert!(settings.as_object().unwrap().is_empty());
}
