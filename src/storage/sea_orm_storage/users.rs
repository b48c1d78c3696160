use super::SeaOrmStorage;
use crate::entity::anonymous_user_ids::Entity as AnonymousUserIds;
use crate::entity::users::Entity as Users;
use crate::errors::{BridgeError, Result};
use crate::models::users::entities::User;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过匿名 ID 解析真实用户
    pub async fn get_user_by_anonymous_id_impl(
        &self,
        anonymous_user_id: &str,
    ) -> Result<Option<User>> {
        let result = AnonymousUserIds::find_by_id(anonymous_user_id.to_string())
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询匿名用户失败: {e}")))?;

        Ok(result.and_then(|(_, user)| user).map(|m| m.into_user()))
    }
}
