use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    courses::entities::CourseKey,
    turnitin::entities::{NewSubmissionMapping, SubmissionMapping},
    users::entities::User,
};

pub mod sea_orm_storage;

#[cfg(test)]
pub(crate) mod testing;

pub use sea_orm_storage::SeaOrmStorage;

/// 提交映射存储
///
/// 只追加写入，唯一的更新是挂载报告 PDF 的 ID。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 远程提交创建成功后写入映射
    async fn create_submission_mapping(
        &self,
        mapping: NewSubmissionMapping,
    ) -> Result<SubmissionMapping>;
    // 按 ORA 提交 ID 列出映射，按 (created_at, id) 升序
    async fn list_submission_mappings(
        &self,
        ora_submission_id: &str,
    ) -> Result<Vec<SubmissionMapping>>;
    // 挂载报告 PDF 的 ID
    async fn attach_report_artifact(&self, mapping_id: i64, artifact_id: &str) -> Result<bool>;
}

/// 宿主平台用户查询
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn user_by_anonymous_id(&self, anonymous_user_id: &str) -> Result<Option<User>>;
}

/// 宿主平台课程查询
#[async_trait::async_trait]
pub trait CourseDirectory: Send + Sync {
    async fn course_exists(&self, course_key: &CourseKey) -> Result<bool>;
    // 课程不存在时返回 None
    async fn course_settings(&self, course_key: &CourseKey) -> Result<Option<serde_json::Value>>;
    // 课程 staff 或 instructor 角色
    async fn has_staff_access(&self, user_id: i64, course_key: &CourseKey) -> Result<bool>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
    let storage = SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
