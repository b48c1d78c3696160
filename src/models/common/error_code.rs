use serde::{Deserialize, Serialize};

/// 业务错误码
///
/// 0 表示成功，1xxx 为通用错误，2xxx 为课程相关，3xxx 为 ORA 提交相关，
/// 4xxx 为 Turnitin 远程服务相关。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationFailed = 1006,

    // 课程
    InvalidCourseKey = 2000,
    CourseNotFound = 2001,
    CoursePermissionDenied = 2002,

    // ORA 提交
    InvalidOraSubmissionId = 3000,
    OraSubmissionNotFound = 3001,
    FileTypeNotAllowed = 3002,
    FileUploadFailed = 3003,
    MultifileUploadNotAllowed = 3004,
    UserNotFound = 3005,

    // Turnitin
    EulaNotAccepted = 4000,
    TurnitinRequestFailed = 4001,
    TurnitinSubmissionRejected = 4002,
}

impl ErrorCode {
    /// 错误码对应的 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::BadRequest
            | ErrorCode::ValidationFailed
            | ErrorCode::InvalidCourseKey
            | ErrorCode::InvalidOraSubmissionId
            | ErrorCode::FileTypeNotAllowed
            | ErrorCode::MultifileUploadNotAllowed => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden | ErrorCode::CoursePermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::NotFound
            | ErrorCode::CourseNotFound
            | ErrorCode::OraSubmissionNotFound
            | ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::EulaNotAccepted
            | ErrorCode::TurnitinRequestFailed
            | ErrorCode::TurnitinSubmissionRejected => StatusCode::BAD_GATEWAY,
            ErrorCode::InternalServerError | ErrorCode::FileUploadFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_course_codes_map_to_client_errors() {
        assert_eq!(
            ErrorCode::InvalidCourseKey.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::CourseNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::CoursePermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::OraSubmissionNotFound as i32, 3001);
    }
}
