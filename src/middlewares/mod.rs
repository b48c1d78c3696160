pub mod require_course_access;
pub mod require_jwt;
pub mod require_staff;

pub use require_course_access::RequireCourseAccess;
pub use require_jwt::RequireJWT;
pub use require_staff::RequireStaff;

use actix_web::{HttpResponse, http::StatusCode, http::header::CONTENT_TYPE};

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status).finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(code, message)),
    }
}

// 辅助函数：创建字段错误响应
pub(crate) fn create_field_error_response(
    status: StatusCode,
    code: ErrorCode,
    field: &str,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::field_error(code, field, message))
}
