/*!
 * 全局 staff 访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。宿主平台以 staff 服务账户推送事件，
 * 非 staff 用户返回 403。
 *
 * ```rust,ignore
 * web::scope("/api/v1/events")
 *     .wrap(RequireStaff)
 *     .wrap(RequireJWT)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;

use crate::models::{ErrorCode, users::entities::User};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireStaff;

impl<S, B> Transform<S, ServiceRequest> for RequireStaff
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireStaffMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireStaffMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireStaffMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireStaffMiddleware<S>
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

        Box::pin(async move {
            let is_staff = req
                .extensions()
                .get::<User>()
                .map(|user| user.is_staff);

            match is_staff {
                Some(true) => Ok(srv.call(req).await?.map_into_left_body()),
                Some(false) => Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::Forbidden,
                        "Staff access required",
                    )
                    .map_into_right_body(),
                )),
                None => Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: missing user",
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}
