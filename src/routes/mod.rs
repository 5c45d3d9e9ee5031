//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트를 명시적인 라우트 테이블로 등록합니다. 보호된 엔드포인트는 핸들러에
//! 토큰 전략(`wrap = "AuthMiddleware::access()"`)이 붙어 있습니다.
//!
//! ```text
//! GET  /, /ping, /health
//! /{API_PREFIX}
//! ├── /auth      login, register, verify-email, verify-phone,
//! │              request-password-reset, reset-password, me (access), refresh (refresh)
//! ├── /users     POST, GET, /me (access), /{id} GET·PUT (access)
//! └── /products  POST, GET, /{id} GET·PATCH·DELETE
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! let app = App::new()
//!     .configure(|cfg| container.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{error, web, HttpRequest};

use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::handlers;

/// `API_PREFIX` 설정(기본 `api/v1`)으로 모든 라우트를 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_routes(cfg, &ServerConfig::api_prefix());
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, prefix: &str) {
    configure_extractors(cfg);

    cfg.service(handlers::app::root)
        .service(handlers::app::ping)
        .service(handlers::app::health_check);

    let scope_path = if prefix.is_empty() {
        String::new()
    } else {
        format!("/{}", prefix)
    };

    cfg.service(
        web::scope(&scope_path)
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_product_routes),
    );
}

/// 본문/쿼리/경로 추출 실패를 envelope 형식의 400 응답으로 바꿉니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::register)
            .service(handlers::auth::verify_email)
            .service(handlers::auth::verify_phone)
            .service(handlers::auth::request_password_reset)
            .service(handlers::auth::reset_password)
            .service(handlers::auth::me)
            .service(handlers::auth::refresh),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // /me 가 /{id} 보다 먼저 등록되어야 함
    cfg.service(
        web::scope("/users")
            .service(handlers::users::create_user)
            .service(handlers::users::get_users)
            .service(handlers::users::get_me)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user),
    );
}

fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .service(handlers::products::create_product)
            .service(handlers::products::find_products)
            .service(handlers::products::find_product)
            .service(handlers::products::update_product)
            .service(handlers::products::remove_product),
    );
}
