//! 토큰 전략 미들웨어
//!
//! 액세스 토큰 전략과 리프레시 토큰 전략은 같은 구현을 공유하는 서로 독립적인 인스턴스입니다.
//! 두 전략 모두 검증 실패 시 핸들러에 도달하기 전에 401로 응답합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::TokenKind;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// Bearer 토큰 인증 미들웨어
pub struct AuthMiddleware {
    kind: TokenKind,
}

impl AuthMiddleware {
    pub fn new(kind: TokenKind) -> Self {
        Self { kind }
    }

    /// 액세스 토큰 전략
    pub fn access() -> Self {
        Self::new(TokenKind::Access)
    }

    /// 리프레시 토큰 전략 (`POST /auth/refresh`)
    pub fn refresh() -> Self {
        Self::new(TokenKind::Refresh)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            kind: self.kind,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use crate::domain::models::AuthenticatedUser;
    use crate::test_support::test_services;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(user)
    }

    #[actix_web::test]
    async fn test_missing_header_is_rejected_before_handler() {
        let services = test_services().await;
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.container.configure(cfg))
                .service(web::resource("/whoami").wrap(AuthMiddleware::access()).route(web::get().to(whoami))),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 401);
    }

    #[actix_web::test]
    async fn test_strategies_accept_only_their_own_kind() {
        let services = test_services().await;
        let user = services.seed_user("strategy@example.com").await;
        let pair = services.tokens.issue(&AuthenticatedUser::from(&user)).unwrap();

        let app = test::init_service(
            App::new()
                .configure(|cfg| services.container.configure(cfg))
                .service(web::resource("/access").wrap(AuthMiddleware::access()).route(web::get().to(whoami)))
                .service(web::resource("/refresh").wrap(AuthMiddleware::refresh()).route(web::get().to(whoami))),
        )
        .await;

        let call = |uri: &'static str, token: &str| {
            test::TestRequest::get()
                .uri(uri)
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_request()
        };

        let ok = test::call_service(&app, call("/access", &pair.access_token)).await;
        assert_eq!(ok.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(ok).await;
        assert_eq!(body["id"], user.id.to_string());

        let wrong = test::call_service(&app, call("/access", &pair.refresh_token)).await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let refresh = test::call_service(&app, call("/refresh", &pair.refresh_token)).await;
        assert_eq!(refresh.status(), StatusCode::OK);
    }
}
