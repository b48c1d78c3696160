use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::ReportService;

// 懒加载的全局 REPORT_SERVICE 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// 路径参数为 (course_id, ora_submission_id)
type SubmissionPath = web::Path<(String, String)>;

pub async fn upload_file(
    req: HttpRequest,
    path: SubmissionPath,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE
        .upload_file(&req, ora_submission_id, payload)
        .await
}

pub async fn get_submission_status(
    req: HttpRequest,
    path: SubmissionPath,
) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE.submission_status(&req, ora_submission_id).await
}

pub async fn get_similarity_report(
    req: HttpRequest,
    path: SubmissionPath,
) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE
        .similarity_report_status(&req, ora_submission_id)
        .await
}

pub async fn generate_similarity_report(
    req: HttpRequest,
    path: SubmissionPath,
) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE
        .generate_similarity_report(&req, ora_submission_id)
        .await
}

pub async fn get_viewer_url(req: HttpRequest, path: SubmissionPath) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE.viewer_url(&req, ora_submission_id).await
}

pub async fn request_report_pdf(
    req: HttpRequest,
    path: SubmissionPath,
) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE
        .request_report_pdf(&req, ora_submission_id)
        .await
}

pub async fn get_report_pdf_status(
    req: HttpRequest,
    path: SubmissionPath,
) -> ActixResult<HttpResponse> {
    let (_, ora_submission_id) = path.into_inner();
    REPORT_SERVICE
        .report_pdf_status(&req, ora_submission_id)
        .await
}

pub async fn get_eula(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.eula_page(&req).await
}

// 配置路由
pub fn configure_turnitin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/platform-plugin-turnitin/{course_id}/api/v1")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload-file/{ora_submission_id}").route(
                    web::post()
                        .to(upload_file)
                        // 学生上传自己的附件，只校验课程存在
                        .wrap(middlewares::RequireCourseAccess::only_course()),
                ),
            )
            .service(
                web::resource("/submission/{ora_submission_id}").route(
                    web::get()
                        .to(get_submission_status)
                        .wrap(middlewares::RequireCourseAccess::new()),
                ),
            )
            .service(
                web::resource("/similarity-report/{ora_submission_id}")
                    .route(
                        web::get()
                            .to(get_similarity_report)
                            .wrap(middlewares::RequireCourseAccess::new()),
                    )
                    .route(
                        web::put()
                            .to(generate_similarity_report)
                            .wrap(middlewares::RequireCourseAccess::new()),
                    ),
            )
            .service(
                web::resource("/viewer-url/{ora_submission_id}").route(
                    web::get()
                        .to(get_viewer_url)
                        .wrap(middlewares::RequireCourseAccess::new()),
                ),
            )
            .service(
                web::resource("/similarity-report-pdf/{ora_submission_id}")
                    .route(
                        web::post()
                            .to(request_report_pdf)
                            .wrap(middlewares::RequireCourseAccess::new()),
                    )
                    .route(
                        web::get()
                            .to(get_report_pdf_status)
                            .wrap(middlewares::RequireCourseAccess::new()),
                    ),
            )
            .service(
                web::resource("/eula").route(
                    web::get()
                        .to(get_eula)
                        .wrap(middlewares::RequireCourseAccess::new()),
                ),
            ),
    );
}
