use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::turnitin::requests::OraSubmissionCreatedEvent;
use crate::services::EventService;

// 懒加载的全局 EVENT_SERVICE 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

pub async fn ora_submission_created(
    req: HttpRequest,
    event: web::Json<OraSubmissionCreatedEvent>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .ora_submission_created(&req, event.into_inner())
        .await
}

// 配置路由
pub fn configure_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            // 仅平台服务账号（staff）可以投递事件
            .wrap(middlewares::RequireStaff)
            .wrap(middlewares::RequireJWT)
            .route(
                "/ora-submission-created",
                web::post().to(ora_submission_created),
            ),
    );
}
