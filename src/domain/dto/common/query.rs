use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;

pub const DEFAULT_LIMIT: u64 = 10;

/// 페이지 번호(0부터)와 크기로 조회 오프셋을 계산합니다.
///
/// 결과가 `u64` 또는 DB의 `BIGINT` 범위를 넘으면 `ValidationError`.
pub fn page_offset(page: u64, limit: u64) -> Result<u64, AppError> {
    page.checked_mul(limit)
        .filter(|offset| *offset <= i64::MAX as u64)
        .ok_or_else(|| AppError::ValidationError(format!("page 값이 너무 큽니다: {}", page)))
}

/// 목록 조회 정렬 기준 컬럼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum SortBy {
    #[default]
    #[serde(rename = "updatedAt")]
    UpdatedAt,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum SortOrder {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[default]
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

/// 목록 조회 쿼리 파라미터 (`?page=&limit=&sortBy=&sortOrder=&search=`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100, message = "limit은 1-100 사이여야 합니다"))]
    pub limit: Option<u64>,

    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,

    #[validate(length(max = 200, message = "검색어는 200자 이하여야 합니다"))]
    pub search: Option<String>,
}

impl QueryParams {
    pub fn page_or(&self, default: u64) -> u64 {
        self.page.unwrap_or(default)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by.unwrap_or_default()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }

    /// 공백만 있는 검색어는 없는 것으로 취급합니다.
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = QueryParams::default();
        assert_eq!(query.page_or(1), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.sort_by(), SortBy::UpdatedAt);
        assert_eq!(query.sort_order(), SortOrder::Desc);
        assert_eq!(query.search(), None);
    }

    #[test]
    fn test_parses_camel_case_query_string() {
        let query: QueryParams =
            serde_json::from_value(serde_json::json!({ "sortBy": "createdAt", "sortOrder": "asc", "limit": 5 })).unwrap();

        assert_eq!(query.sort_by(), SortBy::CreatedAt);
        assert_eq!(query.sort_order(), SortOrder::Asc);
        assert_eq!(query.limit(), 5);
    }

    #[test]
    fn test_page_offset_bounds() {
        assert_eq!(page_offset(0, 10).unwrap(), 0);
        assert_eq!(page_offset(3, 10).unwrap(), 30);
        assert!(matches!(page_offset(u64::MAX, 10), Err(AppError::ValidationError(_))));
        assert!(matches!(page_offset(i64::MAX as u64, 2), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_limit_out_of_range_is_rejected() {
        let query = QueryParams { limit: Some(0), ..Default::default() };
        assert!(query.validate().is_err());

        let query = QueryParams { limit: Some(101), ..Default::default() };
        assert!(query.validate().is_err());
    }
}
