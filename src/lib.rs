//! 스토어프런트 백엔드
//!
//! JWT 인증, 사용자 관리, 상품 카탈로그 CRUD를 제공하는 REST API 서버입니다.
//!
//! # Features
//!
//! - **인증**: 이메일/전화번호 로그인, 회원가입, 이메일/전화번호 인증, 비밀번호 재설정
//! - **JWT**: 서로 다른 시크릿과 만료를 쓰는 액세스/리프레시 토큰
//! - **사용자**: 생성, 목록(페이지), 프로필 조회/수정
//! - **상품**: 생성, 검색/정렬/페이지 목록, 조회, 부분 수정, 삭제
//! - **저장소**: sea-orm (PostgreSQL, 테스트는 인메모리 SQLite)
//! - **Redis**: 선택적 사용자 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 명시적 라우트 테이블 + 토큰 전략 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 입력 검증, envelope 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (ServiceContainer에서 조립)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Postgres + Redis│ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use storefront_backend::core::ServiceContainer;
//! use storefront_backend::routes::configure_all_routes;
//!
//! let container = ServiceContainer::new(&database, redis, MailService::from_env(), jwt, cost);
//! let app = App::new()
//!     .configure(|cfg| container.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

#[cfg(test)]
mod test_support;
