//! 인증 서비스 모듈
//!
//! - [`TokenService`]: 액세스/리프레시 JWT 발급과 검증
//! - [`AuthService`]: 로그인, 회원가입, 인증, 비밀번호 재설정 흐름
//! - [`verification`]: 일회용 인증 토큰(이메일 토큰, OTP, 재설정 토큰) 수명 주기

pub mod auth_service;
pub mod token_service;
pub mod verification;

pub use auth_service::AuthService;
pub use token_service::TokenService;
pub use verification::VerificationKind;
