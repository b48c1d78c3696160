pub mod ora_submission_created;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::app_state;
use super::enablement::SubmissionFilter;
use super::tasks::TaskRunner;
use super::turnitin::SubmissionLifecycle;
use crate::models::turnitin::requests::OraSubmissionCreatedEvent;

/// 宿主平台事件入口
pub struct EventService;

impl EventService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_filter(&self, request: &HttpRequest) -> ActixResult<Arc<dyn SubmissionFilter>> {
        app_state::<dyn SubmissionFilter>(request)
    }

    pub(crate) fn get_runner(&self, request: &HttpRequest) -> ActixResult<Arc<TaskRunner>> {
        app_state::<TaskRunner>(request)
    }

    pub(crate) fn get_lifecycle(&self, request: &HttpRequest) -> ActixResult<Arc<SubmissionLifecycle>> {
        app_state::<SubmissionLifecycle>(request)
    }

    // ORA 提交已创建
    pub async fn ora_submission_created(
        &self,
        request: &HttpRequest,
        event: OraSubmissionCreatedEvent,
    ) -> ActixResult<HttpResponse> {
        ora_submission_created::handle(self, request, event).await
    }
}
