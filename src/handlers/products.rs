//! Product catalog HTTP Handlers
//!
//! 목록 조회는 `page`(1부터), `limit`(최대 100), `sortBy`, `sortOrder`, `search`를 받습니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;

use crate::{
    domain::{
        dto::{
            common::{ApiResponse, QueryParams},
            products::{CreateProductRequest, UpdateProductRequest},
        },
        models::RequestContext,
    },
    errors::AppError,
    handlers::parse_id,
    services::products::ProductService,
};

#[post("")]
pub async fn create_product(
    ctx: RequestContext,
    products: web::Data<ProductService>,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = products.create(&ctx, payload.into_inner()).await?;
    Ok(ApiResponse::created(created).into_response())
}

#[get("")]
pub async fn find_products(
    ctx: RequestContext,
    products: web::Data<ProductService>,
    query: web::Query<QueryParams>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (items, meta) = products.find_all(&ctx, &query).await?;
    Ok(ApiResponse::ok(items).with_meta(meta).into_response())
}

#[get("/{id}")]
pub async fn find_product(
    path: web::Path<String>,
    products: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let product = products.find_one(id).await?;
    Ok(ApiResponse::ok(product).into_response())
}

#[patch("/{id}")]
pub async fn update_product(
    ctx: RequestContext,
    path: web::Path<String>,
    products: web::Data<ProductService>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let id = parse_id(&path)?;
    let updated = products.update(&ctx, id, payload.into_inner()).await?;
    Ok(ApiResponse::ok(updated).into_response())
}

#[delete("/{id}")]
pub async fn remove_product(
    ctx: RequestContext,
    path: web::Path<String>,
    products: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    products.remove(&ctx, id).await?;
    Ok(ApiResponse::ok(()).into_response())
}
