use super::SeaOrmStorage;
use crate::entity::course_access_roles::{Column as RoleColumn, Entity as CourseAccessRoles};
use crate::entity::course_overviews::Entity as CourseOverviews;
use crate::errors::{BridgeError, Result};
use crate::models::courses::entities::{CourseKey, CourseRole};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 课程是否存在
    pub async fn course_exists_impl(&self, course_key: &CourseKey) -> Result<bool> {
        let count = CourseOverviews::find_by_id(course_key.to_string())
            .count(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(count > 0)
    }

    /// 课程自定义设置
    pub async fn course_settings_impl(
        &self,
        course_key: &CourseKey,
    ) -> Result<Option<serde_json::Value>> {
        let result = CourseOverviews::find_by_id(course_key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course_overview().other_course_settings))
    }

    /// 用户是否为课程 staff 或 instructor
    pub async fn has_staff_access_impl(&self, user_id: i64, course_key: &CourseKey) -> Result<bool> {
        let roles: Vec<String> = CourseRole::staff_roles()
            .iter()
            .map(|role| role.to_string())
            .collect();

        let count = CourseAccessRoles::find()
            .filter(RoleColumn::UserId.eq(user_id))
            .filter(RoleColumn::CourseId.eq(course_key.to_string()))
            .filter(RoleColumn::Role.is_in(roles))
            .count(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询课程角色失败: {e}")))?;

        Ok(count > 0)
    }
}
