//! 提交生命周期
//!
//! 每个内容单元（一段文本或一个附件）独立执行：
//! 接受 EULA → 创建远程提交 → 写入映射 → 上传内容。
//! 所有单元处理完后轮询本次上传成功的远程提交，完成后为它们生成相似度报告。

use std::sync::Arc;

use tracing::{error, info, warn};

use super::download::FileFetcher;
use super::poller::CompletionPoller;
use crate::errors::{BridgeError, Result};
use crate::models::turnitin::entities::{ContentUnit, NewSubmissionMapping, SubmissionMapping};
use crate::models::turnitin::payloads::{CreateSubmission, EulaAcceptance};
use crate::models::turnitin::requests::OraSubmissionCreatedEvent;
use crate::models::users::entities::User;
use crate::storage::{Storage, UserDirectory};
use crate::turnitin::{RemoteResponse, TurnitinGateway};
use crate::utils::{current_timestamp, is_allowed_extension};

/// 单个内容单元的结果
#[derive(Debug, Clone)]
pub enum UnitOutcome {
    /// 远程提交已创建，返回上传接口的响应
    Uploaded {
        mapping: SubmissionMapping,
        response: RemoteResponse,
    },
    /// 创建未返回 201，不写映射也不上传
    NotCreated(RemoteResponse),
}

impl UnitOutcome {
    pub fn response(&self) -> &RemoteResponse {
        match self {
            UnitOutcome::Uploaded { response, .. } => response,
            UnitOutcome::NotCreated(response) => response,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitFailure {
    pub file_name: String,
    pub reason: String,
}

/// 一次事件处理的汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifecycleReport {
    pub uploaded: Vec<String>,
    // 本次成功上传的远程提交 ID
    pub uploaded_submission_ids: Vec<String>,
    pub not_created: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<UnitFailure>,
    pub processing_complete: bool,
    pub reports_requested: usize,
}

pub struct SubmissionLifecycle {
    gateway: TurnitinGateway,
    storage: Arc<dyn Storage>,
    users: Arc<dyn UserDirectory>,
    fetcher: Arc<dyn FileFetcher>,
    poller: CompletionPoller,
    allowed_extensions: Vec<String>,
}

impl SubmissionLifecycle {
    pub fn new(
        gateway: TurnitinGateway,
        storage: Arc<dyn Storage>,
        users: Arc<dyn UserDirectory>,
        fetcher: Arc<dyn FileFetcher>,
        poller: CompletionPoller,
        allowed_extensions: Vec<String>,
    ) -> Self {
        Self {
            gateway,
            storage,
            users,
            fetcher,
            poller,
            allowed_extensions,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// 代用户接受 EULA，返回原始响应
    pub async fn accept_eula(&self, user: &User) -> Result<RemoteResponse> {
        let acceptance =
            EulaAcceptance::new(user, current_timestamp(), self.gateway.eula_language());
        self.gateway.accept_eula(&acceptance).await
    }

    /// 创建远程提交，成功后先写映射再上传
    pub async fn create_and_upload(
        &self,
        user: &User,
        ora_submission_id: &str,
        unit: ContentUnit,
    ) -> Result<UnitOutcome> {
        let payload = CreateSubmission::for_user(user, &unit.file_name, current_timestamp());
        let created = self.gateway.create_submission(&payload).await?;
        if !created.is_created() {
            warn!(
                ora_submission_id,
                status = created.status,
                file_name = %unit.file_name,
                "Turnitin rejected submission creation"
            );
            return Ok(UnitOutcome::NotCreated(created));
        }

        let turnitin_submission_id = created.str_field("id").ok_or_else(|| {
            BridgeError::remote_api(format!(
                "Turnitin create submission response has no id: {}",
                created.text()
            ))
        })?;

        let mapping = self
            .storage
            .create_submission_mapping(NewSubmissionMapping {
                user_id: user.id,
                ora_submission_id: Some(ora_submission_id.to_string()),
                turnitin_submission_id: turnitin_submission_id.clone(),
                file_name: Some(unit.file_name.clone()),
            })
            .await?;

        let response = self
            .gateway
            .upload_content(&turnitin_submission_id, &unit.file_name, unit.bytes)
            .await?;
        info!(
            ora_submission_id,
            turnitin_submission_id = %turnitin_submission_id,
            status = response.status,
            "content uploaded to Turnitin"
        );

        Ok(UnitOutcome::Uploaded { mapping, response })
    }

    /// 单个内容单元的完整上传流程
    pub async fn upload_unit(
        &self,
        user: &User,
        ora_submission_id: &str,
        unit: ContentUnit,
    ) -> Result<UnitOutcome> {
        let eula = self.accept_eula(user).await?;
        if !eula.is_success() {
            return Err(BridgeError::eula_not_accepted(format!(
                "EULA acceptance failed with status {}: {}",
                eula.status,
                eula.text()
            )));
        }
        self.create_and_upload(user, ora_submission_id, unit).await
    }

    /// 处理 "ORA 提交已创建" 事件
    pub async fn process_event(&self, event: &OraSubmissionCreatedEvent) -> Result<LifecycleReport> {
        let ora_submission_id = event.submission_id.as_str();
        let user = self
            .users
            .user_by_anonymous_id(&event.anonymous_user_id)
            .await?
            .ok_or_else(|| {
                BridgeError::not_found(format!(
                    "No user found for anonymous id {}",
                    event.anonymous_user_id
                ))
            })?;

        let mut report = LifecycleReport::default();

        for (index, part) in event.text_parts.iter().enumerate() {
            let unit = ContentUnit::text_part(index + 1, &part.text);
            self.run_unit(&user, ora_submission_id, unit, &mut report)
                .await;
        }

        for download in event.file_downloads() {
            if !is_allowed_extension(&download.name, &self.allowed_extensions) {
                info!(
                    ora_submission_id,
                    file_name = %download.name,
                    "file type not allowed, skipping"
                );
                report.skipped.push(download.name);
                continue;
            }
            // 下载失败直接中止整个任务
            let bytes = self.fetcher.fetch(&download.download_url).await?;
            let unit = ContentUnit::new(download.name, bytes);
            self.run_unit(&user, ora_submission_id, unit, &mut report)
                .await;
        }

        let report_failures = self.generate_reports(ora_submission_id, &mut report).await;

        if !report.failures.is_empty() {
            let details: Vec<String> = report
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.file_name, f.reason))
                .collect();
            return Err(BridgeError::upload_failed(format!(
                "Upload to Turnitin failed for submission {ora_submission_id}: {}",
                details.join("; ")
            )));
        }
        if !report_failures.is_empty() {
            return Err(BridgeError::remote_api(format!(
                "Similarity report generation failed for {}",
                report_failures.join(", ")
            )));
        }

        info!(
            ora_submission_id,
            uploaded = report.uploaded.len(),
            skipped = report.skipped.len(),
            reports = report.reports_requested,
            "ORA submission processed"
        );
        Ok(report)
    }

    async fn run_unit(
        &self,
        user: &User,
        ora_submission_id: &str,
        unit: ContentUnit,
        report: &mut LifecycleReport,
    ) {
        let file_name = unit.file_name.clone();
        match self.upload_unit(user, ora_submission_id, unit).await {
            Ok(UnitOutcome::Uploaded { mapping, response }) if response.is_success() => {
                report.uploaded.push(file_name);
                report
                    .uploaded_submission_ids
                    .push(mapping.turnitin_submission_id);
            }
            Ok(UnitOutcome::Uploaded { response, .. }) => {
                error!(
                    ora_submission_id,
                    file_name = %file_name,
                    status = response.status,
                    "Turnitin rejected content upload"
                );
                report.failures.push(UnitFailure {
                    file_name,
                    reason: format!("upload returned {}: {}", response.status, response.text()),
                });
            }
            Ok(UnitOutcome::NotCreated(_)) => report.not_created.push(file_name),
            Err(e) => {
                error!(ora_submission_id, file_name = %file_name, "upload cycle failed: {e}");
                report.failures.push(UnitFailure {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    // 只为本次上传成功的远程提交轮询并生成报告，返回失败的远程 ID。
    // 之前事件留下的映射不会重复请求。
    async fn generate_reports(
        &self,
        ora_submission_id: &str,
        report: &mut LifecycleReport,
    ) -> Vec<String> {
        if report.uploaded_submission_ids.is_empty() {
            return Vec::new();
        }

        report.processing_complete = self
            .poller
            .poll_until_complete(ora_submission_id, &report.uploaded_submission_ids)
            .await;
        if !report.processing_complete {
            // 不安排后续重试，可通过生成报告接口手动触发
            warn!(
                ora_submission_id,
                "similarity reports not requested, submissions still processing"
            );
            return Vec::new();
        }

        let mut failed = Vec::new();
        for submission_id in &report.uploaded_submission_ids {
            let submission_id = submission_id.as_str();
            match self.gateway.generate_similarity_report(submission_id).await {
                Ok(response) if response.is_success() => report.reports_requested += 1,
                Ok(response) => {
                    warn!(
                        turnitin_submission_id = submission_id,
                        status = response.status,
                        "similarity report request rejected"
                    );
                    failed.push(submission_id.to_string());
                }
                Err(e) => {
                    warn!(
                        turnitin_submission_id = submission_id,
                        "similarity report request failed: {e}"
                    );
                    failed.push(submission_id.to_string());
                }
            }
        }
        failed
    }
}
