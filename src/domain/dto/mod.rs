//! 요청/응답 데이터 전송 객체
//!
//! 요청 DTO는 `validator`로 검증하고, 핸들러에서 `AppError::ValidationError`로 변환합니다.

pub mod common;
pub mod auth;
pub mod users;
pub mod products;

pub use common::*;
pub use auth::*;
pub use users::*;
pub use products::*;
