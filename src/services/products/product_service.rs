//! 상품 카탈로그 서비스
//!
//! 목록은 1부터 시작하는 페이지를 사용합니다. (사용자 목록과 다릅니다)

use std::sync::Arc;

use chrono::Utc;
use sea_orm::Set;
use uuid::Uuid;

use crate::{
    domain::{
        dto::{
            common::{page_offset, PaginationMeta, QueryParams},
            products::{CreateProductRequest, ProductResponse, UpdateProductRequest},
        },
        entities::products::{Product, product},
        models::RequestContext,
    },
    errors::AppError,
    repositories::products::{ProductPageQuery, ProductRepository},
    utils::string_utils::slugify,
};

const LOG_TARGET: &str = "ProductService";

pub struct ProductService {
    product_repo: Arc<ProductRepository>,
}

impl ProductService {
    pub fn new(product_repo: Arc<ProductRepository>) -> Self {
        Self { product_repo }
    }

    /// slug를 생략하면 제목에서 만듭니다. 이미 사용 중인 slug는 `ConflictError`.
    pub async fn create(&self, ctx: &RequestContext, request: CreateProductRequest) -> Result<ProductResponse, AppError> {
        let slug = match request.slug {
            Some(slug) => slug,
            None => slugify(&request.title),
        };

        if slug.is_empty() {
            return Err(AppError::ValidationError(
                "제목에서 slug를 만들 수 없습니다. slug를 직접 지정해주세요".to_string(),
            ));
        }

        self.ensure_slug_available(&slug, None).await?;

        let now = Utc::now();
        let model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            description: Set(request.description),
            price: Set(request.price),
            stock: Set(request.stock.unwrap_or(0)),
            title: Set(request.title),
            slug: Set(slug),
            category_id: Set(request.category_id),
            brand_id: Set(request.brand_id),
            is_featured: Set(request.is_featured.unwrap_or(false)),
            is_active: Set(request.is_active.unwrap_or(true)),
            tax_rate: Set(request.tax_rate),
            meta_title: Set(request.meta_title),
            meta_description: Set(request.meta_description),
            tags: Set(product::join_tags(&request.tags)),
            facebook_product_id: Set(request.facebook_product_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = self.product_repo.insert(model).await?;
        log::info!(target: LOG_TARGET, "{} 상품 생성: {} ({})", ctx, created.id, created.slug);

        Ok(ProductResponse::from(created))
    }

    pub async fn find_all(
        &self,
        ctx: &RequestContext,
        query: &QueryParams,
    ) -> Result<(Vec<ProductResponse>, PaginationMeta), AppError> {
        let page = query.page_or(1).max(1);
        let limit = query.limit();

        let page_query = ProductPageQuery {
            offset: page_offset(page - 1, limit)?,
            limit,
            sort_by: query.sort_by(),
            sort_order: query.sort_order(),
            search: query.search().map(String::from),
        };

        let (items, total) = self.product_repo.find_page(&page_query).await?;
        log::debug!(target: LOG_TARGET, "{} 상품 목록 조회: {:?} total={}", ctx, page_query, total);

        Ok((
            items.into_iter().map(ProductResponse::from).collect(),
            PaginationMeta::new(page, limit, total),
        ))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<ProductResponse, AppError> {
        self.get(id).await.map(ProductResponse::from)
    }

    /// 전달된 필드만 반영합니다.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        let existing = self.get(id).await?;

        if let Some(slug) = request.slug.as_deref() {
            if slug != existing.slug {
                self.ensure_slug_available(slug, Some(id)).await?;
            }
        }

        let mut model = product::ActiveModel::from(existing);

        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        if let Some(price) = request.price {
            model.price = Set(price);
        }
        if let Some(stock) = request.stock {
            model.stock = Set(stock);
        }
        if let Some(title) = request.title {
            model.title = Set(title);
        }
        if let Some(slug) = request.slug {
            model.slug = Set(slug);
        }
        if let Some(category_id) = request.category_id {
            model.category_id = Set(Some(category_id));
        }
        if let Some(brand_id) = request.brand_id {
            model.brand_id = Set(Some(brand_id));
        }
        if let Some(is_featured) = request.is_featured {
            model.is_featured = Set(is_featured);
        }
        if let Some(is_active) = request.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(tax_rate) = request.tax_rate {
            model.tax_rate = Set(Some(tax_rate));
        }
        if let Some(meta_title) = request.meta_title {
            model.meta_title = Set(Some(meta_title));
        }
        if let Some(meta_description) = request.meta_description {
            model.meta_description = Set(Some(meta_description));
        }
        if let Some(tags) = request.tags {
            model.tags = Set(product::join_tags(&tags));
        }
        if let Some(facebook_product_id) = request.facebook_product_id {
            model.facebook_product_id = Set(Some(facebook_product_id));
        }
        model.updated_at = Set(Utc::now());

        let updated = self.product_repo.update(model).await?;
        log::info!(target: LOG_TARGET, "{} 상품 수정: {}", ctx, updated.id);

        Ok(ProductResponse::from(updated))
    }

    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        self.product_repo.delete(existing).await?;

        log::info!(target: LOG_TARGET, "{} 상품 삭제: {}", ctx, id);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product with ID \"{}\" not found", id)))
    }

    async fn ensure_slug_available(&self, slug: &str, current: Option<Uuid>) -> Result<(), AppError> {
        match self.product_repo.find_by_slug(slug).await? {
            Some(found) if Some(found.id) != current => Err(AppError::ConflictError(format!(
                "이미 사용 중인 slug입니다: {}",
                slug
            ))),
            _ => Ok(()),
        }
    }
}
