use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use super::{ReportService, invalid_ora_submission_id};
use crate::config::LimitConfig;
use crate::middlewares::RequireJWT;
use crate::models::turnitin::entities::ContentUnit;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::turnitin::UnitOutcome;
use crate::services::{error_response, remote_status};
use crate::utils::validate::file_extension;
use crate::utils::{is_allowed_extension, validate_magic_bytes};

const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

pub async fn upload_file(
    service: &ReportService,
    req: &HttpRequest,
    ora_submission_id: String,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }

    let Some(user) = RequireJWT::extract_user(req) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "用户未登录",
        )));
    };

    let lifecycle = service.get_lifecycle(req)?;
    let max_size = req
        .app_data::<web::Data<LimitConfig>>()
        .map(|limits| limits.max_payload_size)
        .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE);

    // 文件相关信息
    let mut file_name = String::new();
    let mut bytes: Vec<u8> = Vec::new();
    let mut extension = String::new();
    let mut file_uploaded = false;

    while let Some(mut field) = payload.try_next().await? {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }
        file_uploaded = true;

        file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        if !is_allowed_extension(&file_name, lifecycle.allowed_extensions()) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )));
        }
        extension = file_extension(&file_name).unwrap_or_default();

        while let Some(chunk) = field.next().await {
            let data = chunk?;
            if bytes.len() + data.len() > max_size {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "File size exceeds the limit",
                )));
            }
            bytes.extend_from_slice(&data);
        }
    }

    if !file_uploaded || bytes.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "No file found in upload payload",
        )));
    }

    // 读完整个文件后再验证魔术字节
    if !validate_magic_bytes(&bytes, &extension) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "文件内容与扩展名不匹配",
        )));
    }

    // 先代用户接受 EULA
    let eula = match lifecycle.accept_eula(&user).await {
        Ok(response) => response,
        Err(e) => return Ok(error_response(&e)),
    };
    if !eula.is_success() {
        return Ok(
            HttpResponse::build(remote_status(eula.status)).json(ApiResponse::error(
                ErrorCode::EulaNotAccepted,
                eula.json(),
                "Turnitin EULA was not accepted",
            )),
        );
    }

    let unit = ContentUnit::new(file_name, bytes);
    match lifecycle
        .create_and_upload(&user, &ora_submission_id, unit)
        .await
    {
        Ok(UnitOutcome::Uploaded { response, .. }) if response.is_success() => Ok(
            HttpResponse::build(remote_status(response.status))
                .json(ApiResponse::success(response.json(), "File uploaded to Turnitin")),
        ),
        Ok(outcome) => {
            let response = outcome.response();
            Ok(
                HttpResponse::build(remote_status(response.status)).json(ApiResponse::error(
                    ErrorCode::TurnitinSubmissionRejected,
                    response.json(),
                    "Turnitin rejected the submission",
                )),
            )
        }
        Err(e) => Ok(error_response(&e)),
    }
}
