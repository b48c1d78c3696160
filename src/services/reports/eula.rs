use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn eula_page(service: &ReportService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let queries = service.get_queries(request)?;
    match queries.eula_page().await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "EULA page retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
