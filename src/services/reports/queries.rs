use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, invalid_ora_submission_id, lookup_response};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn submission_status(
    service: &ReportService,
    request: &HttpRequest,
    ora_submission_id: String,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }
    let queries = service.get_queries(request)?;
    let result = queries.submission_status(&ora_submission_id).await;
    Ok(lookup_response(
        &ora_submission_id,
        result,
        "Submission status retrieved successfully",
    ))
}

pub async fn similarity_report_status(
    service: &ReportService,
    request: &HttpRequest,
    ora_submission_id: String,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }
    let queries = service.get_queries(request)?;
    let result = queries.similarity_report_status(&ora_submission_id).await;
    Ok(lookup_response(
        &ora_submission_id,
        result,
        "Similarity report status retrieved successfully",
    ))
}

pub async fn generate_similarity_report(
    service: &ReportService,
    request: &HttpRequest,
    ora_submission_id: String,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }
    let queries = service.get_queries(request)?;
    let result = queries.generate_similarity_report(&ora_submission_id).await;
    Ok(lookup_response(
        &ora_submission_id,
        result,
        "Similarity report generation requested",
    ))
}

pub async fn viewer_url(
    service: &ReportService,
    request: &HttpRequest,
    ora_submission_id: String,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }
    let Some(viewer) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "用户未登录",
        )));
    };
    let queries = service.get_queries(request)?;
    let result = queries.viewer_urls(&ora_submission_id, &viewer).await;
    Ok(lookup_response(
        &ora_submission_id,
        result,
        "Viewer URLs created successfully",
    ))
}

pub async fn request_report_pdf(
    service: &ReportService,
    request: &HttpRequest,
    ora_submission_id: String,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }
    let queries = service.get_queries(request)?;
    let result = queries.request_report_pdf(&ora_submission_id).await;
    Ok(lookup_response(
        &ora_submission_id,
        result,
        "Similarity report PDF requested",
    ))
}

pub async fn report_pdf_status(
    service: &ReportService,
    request: &HttpRequest,
    ora_submission_id: String,
) -> ActixResult<HttpResponse> {
    if let Some(response) = invalid_ora_submission_id(&ora_submission_id) {
        return Ok(response);
    }
    let queries = service.get_queries(request)?;
    let result = queries.report_pdf_status(&ora_submission_id).await;
    Ok(lookup_response(
        &ora_submission_id,
        result,
        "Similarity report PDF status retrieved successfully",
    ))
}
