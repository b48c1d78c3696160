use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::models::turnitin::entities::SubmissionMapping;
use crate::models::turnitin::payloads::ViewerLaunch;
use crate::models::turnitin::responses::{EulaPageResponse, ViewerUrlResponse};
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::turnitin::TurnitinGateway;

/// 查询结果：没有任何映射时为 NotFound
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn status_code(&self) -> u16 {
        match self {
            Lookup::Found(_) => 200,
            Lookup::NotFound => 404,
        }
    }
}

/// 面向教师的查询接口
pub struct ReportQueries {
    gateway: TurnitinGateway,
    storage: Arc<dyn Storage>,
    viewer_locale: String,
}

impl ReportQueries {
    pub fn new(gateway: TurnitinGateway, storage: Arc<dyn Storage>, viewer_locale: &str) -> Self {
        Self {
            gateway,
            storage,
            viewer_locale: viewer_locale.to_string(),
        }
    }

    async fn mappings(&self, ora_submission_id: &str) -> Result<Option<Vec<SubmissionMapping>>> {
        let mappings = self.storage.list_submission_mappings(ora_submission_id).await?;
        if mappings.is_empty() {
            debug!(ora_submission_id, "no Turnitin submissions recorded");
            return Ok(None);
        }
        Ok(Some(mappings))
    }

    pub async fn submission_status(&self, ora_submission_id: &str) -> Result<Lookup<Vec<Value>>> {
        let Some(mappings) = self.mappings(ora_submission_id).await? else {
            return Ok(Lookup::NotFound);
        };
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let response = self
                .gateway
                .submission_info(&mapping.turnitin_submission_id)
                .await?;
            results.push(response.json());
        }
        Ok(Lookup::Found(results))
    }

    pub async fn similarity_report_status(
        &self,
        ora_submission_id: &str,
    ) -> Result<Lookup<Vec<Value>>> {
        let Some(mappings) = self.mappings(ora_submission_id).await? else {
            return Ok(Lookup::NotFound);
        };
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let response = self
                .gateway
                .similarity_report_info(&mapping.turnitin_submission_id)
                .await?;
            results.push(response.json());
        }
        Ok(Lookup::Found(results))
    }

    pub async fn generate_similarity_report(
        &self,
        ora_submission_id: &str,
    ) -> Result<Lookup<Vec<Value>>> {
        let Some(mappings) = self.mappings(ora_submission_id).await? else {
            return Ok(Lookup::NotFound);
        };
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let response = self
                .gateway
                .generate_similarity_report(&mapping.turnitin_submission_id)
                .await?;
            results.push(response.json());
        }
        Ok(Lookup::Found(results))
    }

    pub async fn viewer_urls(
        &self,
        ora_submission_id: &str,
        viewer: &User,
    ) -> Result<Lookup<Vec<ViewerUrlResponse>>> {
        let Some(mappings) = self.mappings(ora_submission_id).await? else {
            return Ok(Lookup::NotFound);
        };
        let launch = ViewerLaunch::for_viewer(viewer, &self.viewer_locale);
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let response = self
                .gateway
                .create_viewer_url(&mapping.turnitin_submission_id, &launch)
                .await?;
            let viewer_url = response.str_field("viewer_url");
            // 没拿到链接时带上远程响应
            let remote_response = viewer_url.is_none().then(|| response.json());
            results.push(ViewerUrlResponse {
                viewer_url,
                file_name: mapping.file_name.clone(),
                remote_response,
            });
        }
        Ok(Lookup::Found(results))
    }

    /// 请求生成 PDF 报告，成功时记录 PDF ID
    pub async fn request_report_pdf(&self, ora_submission_id: &str) -> Result<Lookup<Vec<Value>>> {
        let Some(mappings) = self.mappings(ora_submission_id).await? else {
            return Ok(Lookup::NotFound);
        };
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let response = self
                .gateway
                .request_report_pdf(&mapping.turnitin_submission_id)
                .await?;
            if response.is_success()
                && let Some(pdf_id) = response.str_field("id")
            {
                self.storage
                    .attach_report_artifact(mapping.id, &pdf_id)
                    .await?;
            }
            results.push(response.json());
        }
        Ok(Lookup::Found(results))
    }

    pub async fn report_pdf_status(&self, ora_submission_id: &str) -> Result<Lookup<Vec<Value>>> {
        let Some(mappings) = self.mappings(ora_submission_id).await? else {
            return Ok(Lookup::NotFound);
        };
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let value = match &mapping.turnitin_submission_pdf_id {
                Some(pdf_id) => self
                    .gateway
                    .report_pdf_status(&mapping.turnitin_submission_id, pdf_id)
                    .await?
                    .json(),
                None => serde_json::json!({ "status": "NOT_REQUESTED" }),
            };
            results.push(value);
        }
        Ok(Lookup::Found(results))
    }

    pub async fn eula_page(&self) -> Result<EulaPageResponse> {
        let response = self.gateway.eula_page().await?;
        Ok(EulaPageResponse {
            html: response.text(),
            status: response.status,
        })
    }
}
