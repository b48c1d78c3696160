/*!
 * 课程访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。按顺序校验：
 *
 * 1. 路径中的 `course_id` 是否为合法课程标识，否则 400
 * 2. 课程是否存在，否则 404
 * 3. 用户是否为全局 staff，或该课程的 staff / instructor，否则 403
 *
 * `only_course()` 只做前两步，用于学生自己上传文件的接口。
 *
 * ```rust,ignore
 * web::scope("/platform-plugin-turnitin/{course_id}/api/v1")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::resource("/submission/{ora_submission_id}")
 *             .route(web::get().to(get_submission_status).wrap(RequireCourseAccess::new())),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};

use crate::{
    models::{ErrorCode, courses::entities::CourseKey, users::entities::User},
    storage::CourseDirectory,
};

use super::{create_error_response, create_field_error_response};

#[derive(Clone)]
pub struct RequireCourseAccess {
    only_course: bool, // true 表示只校验课程，不校验角色
}

impl RequireCourseAccess {
    /// 需要课程 staff 或 instructor 权限
    pub fn new() -> Self {
        Self { only_course: false }
    }

    /// 只校验课程标识与课程存在
    pub fn only_course() -> Self {
        Self { only_course: true }
    }

    /// 从请求扩展中提取已校验的课程标识
    pub fn extract_course_key(req: &actix_web::HttpRequest) -> Option<CourseKey> {
        req.extensions().get::<CourseKey>().cloned()
    }
}

impl Default for RequireCourseAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCourseAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseAccessMiddleware {
            service: Rc::new(service),
            only_course: self.only_course,
        }))
    }
}

pub struct RequireCourseAccessMiddleware<S> {
    service: Rc<S>,
    only_course: bool,
}

impl<S, B> Service<ServiceRequest> for RequireCourseAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let only_course = self.only_course;

        Box::pin(async move {
            // 1. 校验用户信息
            let user_opt = req.extensions().get::<User>().cloned();
            let Some(user) = user_opt else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: missing user",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. 校验 course_id
            let raw_course_id = req
                .match_info()
                .get("course_id")
                .unwrap_or_default()
                .to_string();
            let course_key = match raw_course_id.parse::<CourseKey>() {
                Ok(key) => key,
                Err(_) => {
                    return Ok(req.into_response(
                        create_field_error_response(
                            StatusCode::BAD_REQUEST,
                            ErrorCode::InvalidCourseKey,
                            "course_id",
                            &format!("The supplied course_id='{raw_course_id}' key is not valid."),
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            let courses_opt = req
                .app_data::<web::Data<Arc<dyn CourseDirectory>>>()
                .map(|data| data.get_ref().clone());
            let Some(courses) = courses_opt else {
                tracing::error!("Course directory not found in app data");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Course directory unavailable",
                    )
                    .map_into_right_body(),
                ));
            };

            // 3. 课程是否存在
            match courses.course_exists(&course_key).await {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(req.into_response(
                        create_field_error_response(
                            StatusCode::NOT_FOUND,
                            ErrorCode::CourseNotFound,
                            "course_id",
                            &format!("The course_id='{raw_course_id}' is not found."),
                        )
                        .map_into_right_body(),
                    ));
                }
                Err(e) => {
                    tracing::error!("Failed to look up course {}: {}", course_key, e);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Failed to look up course",
                        )
                        .map_into_right_body(),
                    ));
                }
            }

            // 4. 全局 staff 或课程 staff / instructor
            if !only_course && !user.is_staff {
                let allowed = courses
                    .has_staff_access(user.id, &course_key)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::error!("Failed to check course roles for {}: {}", user.id, e);
                        false
                    });
                if !allowed {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::CoursePermissionDenied,
                            "You do not have permission to perform this action.",
                        )
                        .map_into_right_body(),
                    ));
                }
            }

            tracing::debug!("User {} granted access to {}", user.id, course_key);
            req.extensions_mut().insert(course_key);
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middlewares::RequireJWT;
    use crate::storage::testing::MemoryStorage;
    use crate::utils::jwt::JwtUtils;
    use crate::{config::JwtConfig, storage::UserDirectory};
    use actix_web::{App, HttpRequest, HttpResponse, test};

    const SECRET: &str = "platform-secret";
    const COURSE: &str = "course-v1:edX+DemoX+Demo_Course";

    async fn echo_course(req: HttpRequest) -> HttpResponse {
        let key = RequireCourseAccess::extract_course_key(&req).unwrap();
        HttpResponse::Ok().body(key.to_string())
    }

    fn user(id: i64, is_staff: bool) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            full_name: String::new(),
            is_staff,
            is_active: true,
        }
    }

    fn storage() -> Arc<MemoryStorage> {
        Arc::new(
            MemoryStorage::new()
                .with_user(user(1, false), "anon-1")
                .with_user(user(2, false), "anon-2")
                .with_user(user(3, true), "anon-3")
                .with_course(COURSE, serde_json::json!({}))
                .with_course_staff(2, COURSE),
        )
    }

    fn bearer(user_id: i64) -> (&'static str, String) {
        let token =
            JwtUtils::generate_with_secret(user_id, SECRET, chrono::Duration::minutes(5)).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    macro_rules! app {
        ($access:expr) => {{
            let storage = storage();
            let users: Arc<dyn UserDirectory> = storage.clone();
            let courses: Arc<dyn CourseDirectory> = storage;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(JwtConfig {
                        secret: SECRET.to_string(),
                    }))
                    .app_data(web::Data::new(users))
                    .app_data(web::Data::new(courses))
                    .service(
                        web::scope("/c/{course_id}")
                            .wrap(RequireJWT)
                            .route("/check", web::get().to(echo_course).wrap($access)),
                    ),
            )
            .await
        }};
    }

    async fn status_for(user_id: i64, course: &str, access: RequireCourseAccess) -> StatusCode {
        let app = app!(access);
        let req = test::TestRequest::get()
            .uri(&format!("/c/{course}/check"))
            .insert_header(bearer(user_id))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_invalid_course_key_is_bad_request() {
        let app = app!(RequireCourseAccess::new());
        let req = test::TestRequest::get()
            .uri("/c/not-a-course/check")
            .insert_header(bearer(3))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["data"]["field_errors"]["course_id"],
            "The supplied course_id='not-a-course' key is not valid."
        );
    }

    #[actix_web::test]
    async fn test_unknown_course_is_not_found() {
        assert_eq!(
            status_for(3, "course-v1:edX+Other+2024", RequireCourseAccess::new()).await,
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_role_checks() {
        // 普通学生
        assert_eq!(
            status_for(1, COURSE, RequireCourseAccess::new()).await,
            StatusCode::FORBIDDEN
        );
        // 课程 staff
        assert_eq!(
            status_for(2, COURSE, RequireCourseAccess::new()).await,
            StatusCode::OK
        );
        // 全局 staff
        assert_eq!(
            status_for(3, COURSE, RequireCourseAccess::new()).await,
            StatusCode::OK
        );
        // 只校验课程
        assert_eq!(
            status_for(1, COURSE, RequireCourseAccess::only_course()).await,
            StatusCode::OK
        );
    }
}
