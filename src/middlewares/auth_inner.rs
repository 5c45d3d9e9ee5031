//! 토큰 전략의 요청 처리 로직
//!
//! 토큰 없음 / 토큰 무효(서명, 만료, 종류) / 토큰 유효 세 상태만 있으며 재시도는 없습니다.
//! 유효한 토큰이어도 사용자가 더 이상 존재하지 않으면 거부합니다.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::{AuthenticatedUser, TokenKind};
use crate::errors::AppError;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

const LOG_TARGET: &str = "AuthMiddleware";

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub kind: TokenKind,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let kind = self.kind;

        Box::pin(async move {
            match authenticate(&req, kind).await {
                Ok(user) => {
                    log::debug!(target: LOG_TARGET, "{} 토큰 인증 성공: {}", kind.as_str(), user.id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!(target: LOG_TARGET, "{} 토큰 인증 실패 ({}): {}", kind.as_str(), req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 헤더에서 토큰을 꺼내 검증하고, 사용자를 다시 조회해 `{id, email}`을 만듭니다.
async fn authenticate(req: &ServiceRequest, kind: TokenKind) -> Result<AuthenticatedUser, AppError> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;
    let user_service = req
        .app_data::<web::Data<UserService>>()
        .ok_or_else(|| AppError::InternalError("UserService가 등록되지 않았습니다".to_string()))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify(token, kind)?;
    let user_id = TokenService::subject(&claims)?;

    user_service
        .find_identity(user_id)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("사용자를 찾을 수 없습니다".to_string()))
}
