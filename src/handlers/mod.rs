//! # HTTP Request Handlers
//!
//! ```text
//! Client
//!   │ HTTP Request/Response
//!   ▼
//! Handlers (이 모듈)    ← 입력 검증, envelope 응답
//!   ▼
//! Services             ← 비즈니스 로직
//!   ▼
//! Repositories         ← 데이터 접근
//! ```
//!
//! 핸들러는 `web::Data`로 등록된 서비스와 요청별 [`RequestContext`](crate::domain::models::RequestContext)를
//! 받습니다. 요청 DTO는 `validator`로 검증한 뒤 서비스에 넘기고, 성공 응답은 항상
//! [`ApiResponse`](crate::domain::dto::common::ApiResponse) envelope로 감쌉니다.
//!
//! - **`app`**: `/`, `/ping`, `/health` (API prefix 밖)
//! - **`auth`**: 로그인, 회원가입, 인증, 비밀번호 재설정, 토큰 갱신
//! - **`users`**: 사용자 생성/조회/수정
//! - **`products`**: 상품 CRUD

use uuid::Uuid;

use crate::errors::AppError;

pub mod app;
pub mod auth;
pub mod products;
pub mod users;

/// 경로 파라미터의 UUID. 형식이 잘못되면 `ValidationError`.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::ValidationError(format!("잘못된 ID 형식입니다: {}", raw)))
}
