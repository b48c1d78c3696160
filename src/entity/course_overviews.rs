//! 课程概览实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_overviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub display_name: String,
    pub other_course_settings: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_access_roles::Entity")]
    CourseAccessRoles,
}

impl Related<super::course_access_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseAccessRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course_overview(self) -> crate::models::courses::entities::CourseOverview {
        // 自定义设置为 JSON 文本，解析失败时视为空对象
        let other_course_settings = self
            .other_course_settings
            .as_deref()
            .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
            .filter(|value| value.is_object())
            .unwrap_or_else(|| serde_json::json!({}));

        crate::models::courses::entities::CourseOverview {
            id: self.id,
            display_name: self.display_name,
            other_course_settings,
        }
    }
}
