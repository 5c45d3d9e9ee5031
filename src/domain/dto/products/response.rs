use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::products::Product;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub title: String,
    pub slug: String,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub is_featured: bool,
    pub is_active: bool,
    pub tax_rate: Option<Decimal>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
    pub facebook_product_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let tags = product.tag_list();

        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            title: product.title,
            slug: product.slug,
            category_id: product.category_id,
            brand_id: product.brand_id,
            is_featured: product.is_featured,
            is_active: product.is_active,
            tax_rate: product.tax_rate,
            meta_title: product.meta_title,
            meta_description: product.meta_description,
            tags,
            facebook_product_id: product.facebook_product_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
