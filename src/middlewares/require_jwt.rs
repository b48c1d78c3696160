/*!
 * JWT 认证中间件
 *
 * 令牌由宿主平台使用共享密钥（HS256）签发，`sub` 为平台用户 ID。
 * 中间件校验令牌后通过 `UserDirectory` 加载用户，拒绝已停用的账户，
 * 并将用户信息存入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/platform-plugin-turnitin/{course_id}/api/v1")
 *     .wrap(RequireCourseAccess::new())
 *     .wrap(RequireJWT)
 * ```
 *
 * 处理程序中：
 *
 * ```rust,ignore
 * let user = RequireJWT::extract_user(&req);
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件使用 `web::Data<JwtConfig>` 中的密钥验证令牌
 * 3. 令牌有效且用户处于启用状态时继续处理请求
 * 4. 否则返回 401
 */

use crate::config::JwtConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::UserDirectory;
use crate::utils::jwt::JwtUtils;
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
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

enum AuthFailure {
    Unauthorized(String),
    Misconfigured(&'static str),
}

// 辅助函数：提取并验证 JWT，加载用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            AuthFailure::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let jwt_config = req
        .app_data::<web::Data<JwtConfig>>()
        .ok_or(AuthFailure::Misconfigured("JWT configuration not found in app data"))?;

    let claims = JwtUtils::verify_with_secret(token, &jwt_config.secret).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid JWT token".to_string())
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Unauthorized("Invalid user ID in JWT".to_string()))?;

    let users = req
        .app_data::<web::Data<Arc<dyn UserDirectory>>>()
        .ok_or(AuthFailure::Misconfigured("User directory not found in app data"))?
        .get_ref()
        .clone();

    let user = users
        .user_by_id(user_id)
        .await
        .map_err(|e| {
            info!("Failed to retrieve user {}: {}", user_id, e);
            AuthFailure::Unauthorized("Failed to retrieve user".to_string())
        })?
        .ok_or_else(|| AuthFailure::Unauthorized("User not found".to_string()))?;

    if !user.is_active {
        return Err(AuthFailure::Unauthorized("User is not active".to_string()));
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(AuthFailure::Unauthorized(err)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(AuthFailure::Misconfigured(err)) => {
                    tracing::error!("{}", err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            err,
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }
}
