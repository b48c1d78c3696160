use std::sync::Arc;

use serde::Serialize;

use super::{ApiRequest, RemoteResponse, TurnitinTransport};
use crate::config::TurnitinConfig;
use crate::errors::Result;
use crate::models::turnitin::payloads::{CreateSubmission, EulaAcceptance, ViewerLaunch};

/// Turnitin API 的固定操作集合
///
/// 只负责路径模板与请求体，状态码的解释交给调用方。
#[derive(Clone)]
pub struct TurnitinGateway {
    transport: Arc<dyn TurnitinTransport>,
    eula_version: String,
    eula_language: String,
    similarity_report_payload: serde_json::Value,
}

impl TurnitinGateway {
    pub fn new(transport: Arc<dyn TurnitinTransport>, config: &TurnitinConfig) -> Self {
        Self {
            transport,
            eula_version: config.eula_version.clone(),
            eula_language: config.eula_language.clone(),
            similarity_report_payload: config.similarity_report_payload.clone(),
        }
    }

    pub fn eula_language(&self) -> &str {
        &self.eula_language
    }

    pub async fn accept_eula(&self, acceptance: &EulaAcceptance) -> Result<RemoteResponse> {
        let path = format!("eula/{}/accept", self.eula_version);
        self.transport
            .call(ApiRequest::post(path, Some(to_json(acceptance)?)))
            .await
    }

    pub async fn eula_page(&self) -> Result<RemoteResponse> {
        let path = format!("eula/{}/view", self.eula_version);
        self.transport
            .call(ApiRequest::get_with_query(
                path,
                serde_json::json!({ "lang": self.eula_language }),
            ))
            .await
    }

    pub async fn create_submission(&self, payload: &CreateSubmission) -> Result<RemoteResponse> {
        self.transport
            .call(ApiRequest::post("submissions", Some(to_json(payload)?)))
            .await
    }

    pub async fn upload_content(
        &self,
        submission_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<RemoteResponse> {
        let path = format!("submissions/{submission_id}/original");
        self.transport
            .call(ApiRequest::upload(path, file_name, bytes))
            .await
    }

    pub async fn submission_info(&self, submission_id: &str) -> Result<RemoteResponse> {
        self.transport
            .call(ApiRequest::get(format!("submissions/{submission_id}")))
            .await
    }

    pub async fn generate_similarity_report(&self, submission_id: &str) -> Result<RemoteResponse> {
        let path = format!("submissions/{submission_id}/similarity");
        self.transport
            .call(ApiRequest::put(
                path,
                Some(self.similarity_report_payload.clone()),
            ))
            .await
    }

    pub async fn similarity_report_info(&self, submission_id: &str) -> Result<RemoteResponse> {
        self.transport
            .call(ApiRequest::get(format!(
                "submissions/{submission_id}/similarity"
            )))
            .await
    }

    pub async fn create_viewer_url(
        &self,
        submission_id: &str,
        launch: &ViewerLaunch,
    ) -> Result<RemoteResponse> {
        let path = format!("submissions/{submission_id}/viewer-url");
        self.transport
            .call(ApiRequest::post(path, Some(to_json(launch)?)))
            .await
    }

    pub async fn request_report_pdf(&self, submission_id: &str) -> Result<RemoteResponse> {
        let path = format!("submissions/{submission_id}/similarity/pdf");
        self.transport.call(ApiRequest::post(path, None)).await
    }

    pub async fn report_pdf_status(
        &self,
        submission_id: &str,
        pdf_id: &str,
    ) -> Result<RemoteResponse> {
        let path = format!("submissions/{submission_id}/similarity/pdf/{pdf_id}/status");
        self.transport.call(ApiRequest::get(path)).await
    }
}

fn to_json<T: Serialize>(payload: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(payload)?)
}
