//! 测试用的内存存储

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use super::{CourseDirectory, Storage, UserDirectory};
use crate::errors::Result;
use crate::models::courses::entities::CourseKey;
use crate::models::turnitin::entities::{NewSubmissionMapping, SubmissionMapping};
use crate::models::users::entities::User;
use crate::turnitin::testing::CallLog;

#[derive(Default)]
pub(crate) struct MemoryStorage {
    mappings: Mutex<Vec<SubmissionMapping>>,
    users: Mutex<HashMap<i64, User>>,
    anonymous_ids: Mutex<HashMap<String, i64>>,
    courses: Mutex<HashMap<String, serde_json::Value>>,
    course_staff: Mutex<Vec<(i64, String)>>,
    settings_lookups: AtomicUsize,
    log: Option<CallLog>,
}

impl MemoryStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    pub(crate) fn with_user(self, user: User, anonymous_id: &str) -> Self {
        self.anonymous_ids
            .lock()
            .unwrap()
            .insert(anonymous_id.to_string(), user.id);
        self.users.lock().unwrap().insert(user.id, user);
        self
    }

    pub(crate) fn with_course(self, course_id: &str, settings: serde_json::Value) -> Self {
        self.courses
            .lock()
            .unwrap()
            .insert(course_id.to_string(), settings);
        self
    }

    pub(crate) fn with_course_staff(self, user_id: i64, course_id: &str) -> Self {
        self.course_staff
            .lock()
            .unwrap()
            .push((user_id, course_id.to_string()));
        self
    }

    pub(crate) fn mappings(&self) -> Vec<SubmissionMapping> {
        self.mappings.lock().unwrap().clone()
    }

    pub(crate) fn settings_lookups(&self) -> usize {
        self.settings_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn create_submission_mapping(
        &self,
        mapping: NewSubmissionMapping,
    ) -> Result<SubmissionMapping> {
        if let Some(log) = &self.log {
            log.lock()
                .unwrap()
                .push(format!("store {}", mapping.turnitin_submission_id));
        }
        let mut mappings = self.mappings.lock().unwrap();
        let created = SubmissionMapping {
            id: mappings.len() as i64 + 1,
            user_id: mapping.user_id,
            ora_submission_id: mapping.ora_submission_id,
            turnitin_submission_id: mapping.turnitin_submission_id,
            turnitin_submission_pdf_id: None,
            file_name: mapping.file_name,
            created_at: Utc::now(),
        };
        mappings.push(created.clone());
        Ok(created)
    }

    async fn list_submission_mappings(
        &self,
        ora_submission_id: &str,
    ) -> Result<Vec<SubmissionMapping>> {
        Ok(self
            .mappings
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.ora_submission_id.as_deref() == Some(ora_submission_id))
            .cloned()
            .collect())
    }

    async fn attach_report_artifact(&self, mapping_id: i64, artifact_id: &str) -> Result<bool> {
        let mut mappings = self.mappings.lock().unwrap();
        match mappings.iter_mut().find(|m| m.id == mapping_id) {
            Some(mapping) => {
                mapping.turnitin_submission_pdf_id = Some(artifact_id.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for MemoryStorage {
    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn user_by_anonymous_id(&self, anonymous_user_id: &str) -> Result<Option<User>> {
        let user_id = self
            .anonymous_ids
            .lock()
            .unwrap()
            .get(anonymous_user_id)
            .copied();
        Ok(user_id.and_then(|id| self.users.lock().unwrap().get(&id).cloned()))
    }
}

#[async_trait::async_trait]
impl CourseDirectory for MemoryStorage {
    async fn course_exists(&self, course_key: &CourseKey) -> Result<bool> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .contains_key(&course_key.to_string()))
    }

    async fn course_settings(&self, course_key: &CourseKey) -> Result<Option<serde_json::Value>> {
        self.settings_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .courses
            .lock()
            .unwrap()
            .get(&course_key.to_string())
            .cloned())
    }

    async fn has_staff_access(&self, user_id: i64, course_key: &CourseKey) -> Result<bool> {
        let course_id = course_key.to_string();
        Ok(self
            .course_staff
            .lock()
            .unwrap()
            .iter()
            .any(|(id, course)| *id == user_id && *course == course_id))
    }
}

pub(crate) fn learner() -> User {
    User {
        id: 7,
        username: "jdoe".to_string(),
        email: "jdoe@example.com".to_string(),
        full_name: "Jane Doe".to_string(),
        is_staff: false,
        is_active: true,
    }
}
