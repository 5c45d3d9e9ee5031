//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록, 비밀번호 해싱/검증, 프로필 조회와 수정을 담당합니다.

pub mod user_service;

pub use user_service::UserService;
