use super::SeaOrmStorage;
use crate::entity::turnitin_submissions::{ActiveModel, Column, Entity as TurnitinSubmissions};
use crate::errors::{BridgeError, Result};
use crate::models::turnitin::entities::{NewSubmissionMapping, SubmissionMapping};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入提交映射
    pub async fn create_submission_mapping_impl(
        &self,
        mapping: NewSubmissionMapping,
    ) -> Result<SubmissionMapping> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(mapping.user_id),
            ora_submission_id: Set(mapping.ora_submission_id),
            turnitin_submission_id: Set(mapping.turnitin_submission_id),
            turnitin_submission_pdf_id: Set(None),
            file_name: Set(mapping.file_name),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("创建提交映射失败: {e}")))?;

        Ok(result.into_submission_mapping())
    }

    /// 按 ORA 提交 ID 列出映射
    pub async fn list_submission_mappings_impl(
        &self,
        ora_submission_id: &str,
    ) -> Result<Vec<SubmissionMapping>> {
        let rows = TurnitinSubmissions::find()
            .filter(Column::OraSubmissionId.eq(ora_submission_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询提交映射失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| m.into_submission_mapping())
            .collect())
    }

    /// 挂载报告 PDF 的 ID
    pub async fn attach_report_artifact_impl(
        &self,
        mapping_id: i64,
        artifact_id: &str,
    ) -> Result<bool> {
        let Some(existing) = TurnitinSubmissions::find_by_id(mapping_id)
            .one(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("查询提交映射失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.turnitin_submission_pdf_id = Set(Some(artifact_id.to_string()));
        model
            .update(&self.db)
            .await
            .map_err(|e| BridgeError::database_operation(format!("更新提交映射失败: {e}")))?;

        Ok(true)
    }
}
