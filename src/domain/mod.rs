//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - sea-orm 엔티티 (users, products)
//! ├── dto       - 요청/응답 데이터 전송 객체, 응답 envelope
//! └── models    - 토큰 클레임, 인증 사용자, 요청 컨텍스트
//! ```
//!
//! 엔티티는 영속성 표현만 담당하고, 외부로 노출되는 형태는 항상 DTO를 거칩니다.
//! 비밀번호 해시나 인증 토큰 같은 컬럼은 응답 DTO에 포함되지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
