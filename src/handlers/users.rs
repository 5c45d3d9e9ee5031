//! # User Management HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/users` | - | 사용자 생성 (201) |
//! | `GET` | `/users?page&limit` | - | 목록 (page는 0부터) |
//! | `GET` | `/users/me` | access | 내 프로필 |
//! | `GET` | `/users/{id}` | access | 사용자 조회 |
//! | `PUT` | `/users/{id}` | access | 프로필 부분 수정 |

use actix_web::{get, post, put, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{
    domain::{
        dto::{
            common::{ApiResponse, PaginationMeta, DEFAULT_LIMIT},
            users::{CreateUserRequest, UpdateUserRequest, UserResponse},
        },
        models::{AuthenticatedUser, RequestContext},
    },
    errors::AppError,
    handlers::parse_id,
    middlewares::AuthMiddleware,
    services::users::UserService,
};

#[derive(Debug, Deserialize, Validate)]
pub struct UserListQuery {
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100, message = "limit은 1-100 사이여야 합니다"))]
    pub limit: Option<u64>,
}

#[post("")]
pub async fn create_user(
    ctx: RequestContext,
    users: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = users.create(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::created(UserResponse::from(user)).into_response())
}

#[get("")]
pub async fn get_users(
    ctx: RequestContext,
    users: web::Data<UserService>,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let page = query.page.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let (items, total) = users.get_users(&ctx, limit, page).await?;
    Ok(ApiResponse::ok(items)
        .with_meta(PaginationMeta::new(page, limit, total))
        .into_response())
}

#[get("/me", wrap = "AuthMiddleware::access()")]
pub async fn get_me(
    user: AuthenticatedUser,
    users: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let found = users.find_by_id(user.id).await?;
    Ok(ApiResponse::ok(UserResponse::from(found)).into_response())
}

#[get("/{id}", wrap = "AuthMiddleware::access()")]
pub async fn get_user(
    path: web::Path<String>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let found = users.find_by_id(id).await?;
    Ok(ApiResponse::ok(UserResponse::from(found)).into_response())
}

#[put("/{id}", wrap = "AuthMiddleware::access()")]
pub async fn update_user(
    ctx: RequestContext,
    path: web::Path<String>,
    users: web::Data<UserService>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let id = parse_id(&path)?;
    let updated = users.update(&ctx, id, payload.into_inner()).await?;
    Ok(ApiResponse::ok(UserResponse::from(updated)).into_response())
}
