use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품명은 1-200자 사이여야 합니다"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: Option<i32>,

    #[validate(length(min = 1, max = 255, message = "제목은 1-255자 사이여야 합니다"))]
    pub title: String,

    /// 생략하면 제목으로부터 생성됩니다.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,

    #[validate(custom(function = "validate_tax_rate"))]
    pub tax_rate: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub facebook_product_id: Option<String>,
}

/// 부분 수정 요청. 전달된 필드만 변경됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품명은 1-200자 사이여야 합니다"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: Option<i32>,

    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,

    #[validate(custom(function = "validate_tax_rate"))]
    pub tax_rate: Option<Decimal>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub facebook_product_id: Option<String>,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    // decimal(10, 2)
    let max = Decimal::new(99_999_999_99, 2);
    if price.is_sign_negative() || *price > max {
        return Err(ValidationError::new("invalid_price")
            .with_message("가격은 0 이상 99,999,999.99 이하여야 합니다".into()));
    }
    Ok(())
}

fn validate_tax_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if rate.is_sign_negative() || *rate > Decimal::new(100, 0) {
        return Err(ValidationError::new("invalid_tax_rate")
            .with_message("세율은 0-100 사이여야 합니다".into()));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && slug.len() <= 255
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid {
        return Err(ValidationError::new("invalid_slug")
            .with_message("slug는 소문자, 숫자, 하이픈만 사용할 수 있습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProductRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Linen Shirt",
            "price": "49.90",
            "title": "Linen Shirt - Summer",
            "tags": ["summer", "linen"]
        }))
        .unwrap()
    }

    #[test]
    fn test_minimal_create_request_is_valid() {
        let request = request();
        assert!(request.validate().is_ok());
        assert_eq!(request.price, Decimal::new(4990, 2));
        assert!(request.slug.is_none());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut request = request();
        request.price = Decimal::new(-1, 0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_slug_format() {
        assert!(validate_slug("linen-shirt-2").is_ok());
        assert!(validate_slug("Linen Shirt").is_err());
        assert!(validate_slug("").is_err());
    }
}
