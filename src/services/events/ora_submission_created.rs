use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use crate::models::turnitin::requests::OraSubmissionCreatedEvent;
use crate::models::turnitin::responses::EventAcceptedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::enablement::EnablementContext;
use crate::services::error_response;

pub async fn handle(
    service: &EventService,
    request: &HttpRequest,
    event: OraSubmissionCreatedEvent,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = event.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Invalid ORA submission event",
        )));
    }

    let filter = service.get_filter(request)?;
    let context = EnablementContext {
        course_id: event.course_id.clone(),
        item_location: event.item_location.clone(),
    };
    let decision = match filter.run(&context).await {
        Ok(decision) => decision,
        Err(e) => return Ok(error_response(&e)),
    };

    if !decision.enabled {
        info!(
            ora_submission_id = %event.submission_id,
            "turnitin submission disabled, event ignored"
        );
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventAcceptedResponse {
                submission_id: event.submission_id,
                enabled: false,
            },
            "Turnitin submission is disabled for this course",
        )));
    }

    let runner = service.get_runner(request)?;
    let lifecycle = service.get_lifecycle(request)?;
    let submission_id = event.submission_id.clone();

    runner.spawn(submission_id.clone(), async move {
        lifecycle.process_event(&event).await.map(|_| ())
    });

    Ok(HttpResponse::Accepted().json(ApiResponse::success(
        EventAcceptedResponse {
            submission_id,
            enabled: true,
        },
        "ORA submission queued for Turnitin",
    )))
}
