//! Turnitin 提交映射实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "turnitin_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub ora_submission_id: Option<String>,
    #[sea_orm(unique)]
    pub turnitin_submission_id: String,
    pub turnitin_submission_pdf_id: Option<String>,
    pub file_name: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission_mapping(self) -> crate::models::turnitin::entities::SubmissionMapping {
        use crate::models::turnitin::entities::SubmissionMapping;
        use chrono::{DateTime, Utc};

        SubmissionMapping {
            id: self.id,
            user_id: self.user_id,
            ora_submission_id: self.ora_submission_id,
            turnitin_submission_id: self.turnitin_submission_id,
            turnitin_submission_pdf_id: self.turnitin_submission_pdf_id,
            file_name: self.file_name,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
