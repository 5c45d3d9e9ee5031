use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// 모든 성공 응답에 사용하는 공통 envelope
///
/// ```json
/// { "success": true, "statusCode": 200, "message": "Success", "data": { ... }, "meta": { ... } }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: "Success".to_string(),
            data,
            meta: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    pub fn with_meta(mut self, meta: PaginationMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// envelope의 상태 코드로 HTTP 응답을 만듭니다.
    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}

/// 목록 응답의 페이지 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self { page, limit, total, total_pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).total_pages, 2);
        assert_eq!(PaginationMeta::new(1, 3, 7).total_pages, 3);
    }

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::created(serde_json::json!({ "id": 1 }))
            .with_meta(PaginationMeta::new(2, 5, 12));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["message"], "Success");
        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["meta"]["totalPages"], 3);
    }

    #[test]
    fn test_meta_is_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::ok(())).unwrap();
        assert!(value.get("meta").is_none());
        assert!(value["data"].is_null());
    }
}
