//! Authentication HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/auth/login` | - | 200 |
//! | `POST` | `/auth/register` | - | 201 |
//! | `POST` | `/auth/verify-email` | - | 200 |
//! | `POST` | `/auth/verify-phone` | - | 200 |
//! | `POST` | `/auth/request-password-reset` | - | 200 |
//! | `POST` | `/auth/reset-password` | - | 200 |
//! | `GET` | `/auth/me` | access | 200 |
//! | `POST` | `/auth/refresh` | refresh | 200 |

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    domain::{
        dto::{
            auth::{
                RequestPasswordResetRequest, ResetPasswordRequest, SignInRequest, SignUpRequest,
                VerifyEmailRequest, VerifyPhoneRequest,
            },
            common::ApiResponse,
        },
        models::{AuthenticatedUser, RequestContext},
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::auth::AuthService,
};

#[post("/login")]
pub async fn login(
    ctx: RequestContext,
    auth: web::Data<AuthService>,
    payload: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let tokens = auth.login(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::ok(tokens).into_response())
}

#[post("/register")]
pub async fn register(
    ctx: RequestContext,
    auth: web::Data<AuthService>,
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let tokens = auth.register(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::created(tokens).into_response())
}

#[post("/verify-email")]
pub async fn verify_email(
    ctx: RequestContext,
    auth: web::Data<AuthService>,
    payload: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    auth.verify_email(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::ok(()).into_response())
}

#[post("/verify-phone")]
pub async fn verify_phone(
    ctx: RequestContext,
    auth: web::Data<AuthService>,
    payload: web::Json<VerifyPhoneRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    auth.verify_phone(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::ok(()).into_response())
}

#[post("/request-password-reset")]
pub async fn request_password_reset(
    ctx: RequestContext,
    auth: web::Data<AuthService>,
    payload: web::Json<RequestPasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    auth.request_password_reset(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::ok(()).into_response())
}

#[post("/reset-password")]
pub async fn reset_password(
    ctx: RequestContext,
    auth: web::Data<AuthService>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    auth.reset_password(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::ok(()).into_response())
}

/// 액세스 토큰의 사용자 `{id, email}`
#[get("/me", wrap = "AuthMiddleware::access()")]
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(ApiResponse::ok(user).into_response())
}

/// 리프레시 토큰으로 새 토큰 쌍 발급
#[post("/refresh", wrap = "AuthMiddleware::refresh()")]
pub async fn refresh(
    user: AuthenticatedUser,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let tokens = auth.refresh_token(&user).await?;
    Ok(ApiResponse::ok(tokens).into_response())
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::test_support::{init_test_app, test_services, TEST_PASSWORD};

    #[actix_web::test]
    async fn test_login_then_me_returns_same_user() {
        let services = test_services().await;
        let user = services.seed_user("user@example.com").await;
        let app = init_test_app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "user@example.com", "password": TEST_PASSWORD }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Success");
        let access_token = body["data"]["accessToken"].as_str().unwrap().to_string();
        assert!(!access_token.is_empty());
        assert!(!body["data"]["refreshToken"].as_str().unwrap().is_empty());

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {}", access_token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"], json!({ "id": user.id.to_string(), "email": "user@example.com" }));
    }

    #[actix_web::test]
    async fn test_login_with_wrong_password_is_401() {
        let services = test_services().await;
        services.seed_user("user@example.com").await;
        let app = init_test_app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "user@example.com", "password": "wrongPassword1" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_register_is_created_and_refresh_works() {
        let services = test_services().await;
        let app = init_test_app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "email": "new@example.com", "password": TEST_PASSWORD, "firstName": "New" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["statusCode"], 201);
        let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", refresh_token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_register_without_identifier_is_400() {
        let services = test_services().await;
        let app = init_test_app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "password": TEST_PASSWORD }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let services = test_services().await;
        let app = init_test_app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["statusCode"], 400);
    }

    #[actix_web::test]
    async fn test_invalid_reset_token_is_400() {
        let services = test_services().await;
        let app = init_test_app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/reset-password")
            .set_json(json!({ "token": "deadbeef", "password": "newPassword456" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
