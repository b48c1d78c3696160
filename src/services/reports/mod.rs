pub mod eula;
pub mod queries;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::sync::Arc;

use super::turnitin::{Lookup, ReportQueries, SubmissionLifecycle};
use super::{app_state, error_response};
use crate::errors::Result;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_ora_submission_id;

/// 面向课程的 Turnitin 接口
pub struct ReportService;

impl ReportService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_lifecycle(&self, request: &HttpRequest) -> ActixResult<Arc<SubmissionLifecycle>> {
        app_state::<SubmissionLifecycle>(request)
    }

    pub(crate) fn get_queries(&self, request: &HttpRequest) -> ActixResult<Arc<ReportQueries>> {
        app_state::<ReportQueries>(request)
    }

    // 学生上传附件
    pub async fn upload_file(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_file(self, request, ora_submission_id, payload).await
    }

    // 远程提交状态
    pub async fn submission_status(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
    ) -> ActixResult<HttpResponse> {
        queries::submission_status(self, request, ora_submission_id).await
    }

    // 相似度报告状态
    pub async fn similarity_report_status(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
    ) -> ActixResult<HttpResponse> {
        queries::similarity_report_status(self, request, ora_submission_id).await
    }

    // 生成相似度报告
    pub async fn generate_similarity_report(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
    ) -> ActixResult<HttpResponse> {
        queries::generate_similarity_report(self, request, ora_submission_id).await
    }

    // 查看器链接
    pub async fn viewer_url(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
    ) -> ActixResult<HttpResponse> {
        queries::viewer_url(self, request, ora_submission_id).await
    }

    // 请求 PDF 报告
    pub async fn request_report_pdf(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
    ) -> ActixResult<HttpResponse> {
        queries::request_report_pdf(self, request, ora_submission_id).await
    }

    // PDF 报告状态
    pub async fn report_pdf_status(
        &self,
        request: &HttpRequest,
        ora_submission_id: String,
    ) -> ActixResult<HttpResponse> {
        queries::report_pdf_status(self, request, ora_submission_id).await
    }

    // EULA 页面
    pub async fn eula_page(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        eula::eula_page(self, request).await
    }
}

// ora_submission_id 不合法时返回 400 字段错误
pub(crate) fn invalid_ora_submission_id(ora_submission_id: &str) -> Option<HttpResponse> {
    validate_ora_submission_id(ora_submission_id)
        .err()
        .map(|message| {
            HttpResponse::BadRequest().json(ApiResponse::field_error(
                ErrorCode::InvalidOraSubmissionId,
                "ora_submission_id",
                message,
            ))
        })
}

// 查询结果转换为响应
pub(crate) fn lookup_response<T: Serialize>(
    ora_submission_id: &str,
    result: Result<Lookup<T>>,
    message: &str,
) -> HttpResponse {
    match result {
        Ok(Lookup::Found(data)) => HttpResponse::Ok().json(ApiResponse::success(data, message)),
        Ok(Lookup::NotFound) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::OraSubmissionNotFound,
            format!("No Turnitin submission found for ora_submission_id='{ora_submission_id}'"),
        )),
        Err(e) => error_response(&e),
    }
}
