//! 환경 변수 기반 타입 설정
//!
//! 각 설정은 상태 없는 구조체의 연관 함수로 노출되며, 호출 시점의 환경 변수를 읽습니다.
//! `.env` 파일은 `main`에서 `PROFILE`에 따라 미리 로드됩니다.
//!
//! - [`data_config`]: 실행 환경, HTTP 서버, bcrypt, 데이터베이스
//! - [`auth_config`]: JWT 시크릿과 만료 시간
//! - [`mail_config`]: 메일/SMS 발송 API

pub mod data_config;
pub mod auth_config;
pub mod mail_config;

pub use data_config::*;
pub use auth_config::*;
pub use mail_config::*;
