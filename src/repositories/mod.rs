//! 데이터 접근 계층
//!
//! 리포지토리는 sea-orm 쿼리를 감싸고 `DbErr`를 `AppError::DatabaseError`로 변환합니다.
//! 비즈니스 규칙(인증, 토큰 만료 판단 등)은 서비스 계층에서 처리합니다.

pub mod users;
pub mod products;
