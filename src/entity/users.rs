//! 用户实体（宿主平台只读镜像）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anonymous_user_ids::Entity")]
    AnonymousUserIds,
    #[sea_orm(has_many = "super::course_access_roles::Entity")]
    CourseAccessRoles,
    #[sea_orm(has_many = "super::turnitin_submissions::Entity")]
    TurnitinSubmissions,
}

impl Related<super::anonymous_user_ids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnonymousUserIds.def()
    }
}

impl Related<super::course_access_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseAccessRoles.def()
    }
}

impl Related<super::turnitin_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TurnitinSubmissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        crate::models::users::entities::User {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name.unwrap_or_default(),
            is_staff: self.is_staff,
            is_active: self.is_active,
        }
    }
}
