use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    db::Database,
    domain::{
        dto::common::{SortBy, SortOrder},
        entities::products::{Product, Products, product},
    },
    errors::AppError,
};

/// 상품 목록 조회 조건
#[derive(Debug, Clone)]
pub struct ProductPageQuery {
    pub offset: u64,
    pub limit: u64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub search: Option<String>,
}

pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            db: database.connection().clone(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Products::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, AppError> {
        Products::find()
            .filter(product::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// `(현재 페이지 상품, 조건에 맞는 전체 수)`
    pub async fn find_page(&self, query: &ProductPageQuery) -> Result<(Vec<Product>, u64), AppError> {
        let total = Self::filtered(query)
            .count(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let sort_column = match query.sort_by {
            SortBy::UpdatedAt => product::Column::UpdatedAt,
            SortBy::CreatedAt => product::Column::CreatedAt,
        };

        let select = match query.sort_order {
            SortOrder::Asc => Self::filtered(query).order_by_asc(sort_column),
            SortOrder::Desc => Self::filtered(query).order_by_desc(sort_column),
        };

        let items = select
            .order_by_asc(product::Column::Id)
            .offset(query.offset)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((items, total))
    }

    pub async fn insert(&self, model: product::ActiveModel) -> Result<Product, AppError> {
        model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn update(&self, model: product::ActiveModel) -> Result<Product, AppError> {
        model
            .update(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete(&self, product: Product) -> Result<(), AppError> {
        product
            .delete(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn filtered(query: &ProductPageQuery) -> Select<Products> {
        let select = Products::find();
        match query.search.as_deref() {
            Some(term) => select.filter(product::Column::Name.contains(term)),
            None => select,
        }
    }
}
