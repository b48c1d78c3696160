pub mod enablement;
pub mod events;
pub mod reports;
pub mod tasks;
pub mod turnitin;

pub use enablement::{EnablementContext, EnablementDecision, EnablementPolicy, SubmissionFilter};
pub use events::EventService;
pub use reports::ReportService;
pub use tasks::TaskRunner;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use std::sync::Arc;

use crate::errors::BridgeError;
use crate::models::{ApiResponse, ErrorCode};

/// 从 app data 中取出共享组件
pub(crate) fn app_state<T: ?Sized + 'static>(request: &HttpRequest) -> ActixResult<Arc<T>> {
    request
        .app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("{} not found in app data", std::any::type_name::<T>());
            actix_web::error::ErrorInternalServerError("Application state unavailable")
        })
}

/// 业务错误对应的错误码
pub(crate) fn error_code_for(error: &BridgeError) -> ErrorCode {
    match error {
        BridgeError::Validation(_) => ErrorCode::ValidationFailed,
        BridgeError::NotFound(_) => ErrorCode::NotFound,
        BridgeError::Authentication(_) => ErrorCode::Unauthorized,
        BridgeError::Authorization(_) => ErrorCode::Forbidden,
        BridgeError::EulaNotAccepted(_) => ErrorCode::EulaNotAccepted,
        BridgeError::RemoteTransport(_)
        | BridgeError::RemoteApi(_)
        | BridgeError::FileDownload(_) => ErrorCode::TurnitinRequestFailed,
        BridgeError::UploadFailed(_) => ErrorCode::FileUploadFailed,
        _ => ErrorCode::InternalServerError,
    }
}

pub(crate) fn error_response(error: &BridgeError) -> HttpResponse {
    let code = error_code_for(error);
    if code == ErrorCode::InternalServerError {
        tracing::error!("{}", error);
    } else {
        tracing::warn!("{}", error);
    }
    HttpResponse::build(code.http_status()).json(ApiResponse::error_empty(code, error.message()))
}

/// 远程状态码原样透传，无法识别时为 502
pub(crate) fn remote_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}
