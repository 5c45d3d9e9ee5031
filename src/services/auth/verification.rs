//! 일회용 인증 토큰 수명 주기
//!
//! 이메일 인증 토큰, 전화번호 OTP, 비밀번호 재설정 토큰을 발급하고 소비합니다.
//! 토큰은 사용자 행에 저장되며 종류별로 하나만 유지됩니다. 재발급은 이전 토큰을 덮어쓰고,
//! 소비에 성공하면 같은 저장에서 토큰과 만료 시각을 함께 비웁니다.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::domain::entities::users::User;

/// 토큰 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationKind {
    /// 32바이트 hex, 24시간
    EmailVerification,
    /// 6자리 숫자, 10분
    PhoneOtp,
    /// 32바이트 hex, 1시간
    PasswordReset,
}

impl VerificationKind {
    pub fn ttl(&self) -> Duration {
        match self {
            VerificationKind::EmailVerification => Duration::hours(24),
            VerificationKind::PhoneOtp => Duration::minutes(10),
            VerificationKind::PasswordReset => Duration::hours(1),
        }
    }

    fn generate_value(&self) -> String {
        match self {
            VerificationKind::PhoneOtp => generate_otp(),
            _ => generate_token(),
        }
    }
}

/// 발급된 토큰 값과 만료 시각
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

/// 32 random bytes, hex 인코딩 (64자)
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

pub fn generate_otp() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// 새 토큰을 만들어 사용자 행에 기록합니다. 기존 미사용 토큰은 덮어씁니다.
pub fn issue(user: &mut User, kind: VerificationKind, now: DateTime<Utc>) -> IssuedToken {
    let issued = IssuedToken {
        value: kind.generate_value(),
        expires_at: now + kind.ttl(),
    };

    let (token, expires) = slots(user, kind);
    *token = Some(issued.value.clone());
    *expires = Some(issued.expires_at);

    issued
}

/// 제시된 값이 저장된 토큰과 일치하고 아직 만료되지 않았는지 확인합니다.
pub fn is_consumable(user: &User, kind: VerificationKind, presented: &str, now: DateTime<Utc>) -> bool {
    let (token, expires) = match kind {
        VerificationKind::EmailVerification => (&user.verification_token, &user.verification_token_expires),
        VerificationKind::PhoneOtp => (&user.phone_otp, &user.phone_otp_expires),
        VerificationKind::PasswordReset => (&user.reset_token, &user.reset_token_expires),
    };

    match (token.as_deref(), expires) {
        (Some(stored), Some(expires_at)) => {
            !stored.is_empty() && stored == presented && *expires_at >= now
        }
        _ => false,
    }
}

/// 토큰과 만료 시각을 비웁니다.
pub fn clear(user: &mut User, kind: VerificationKind) {
    let (token, expires) = slots(user, kind);
    *token = None;
    *expires = None;
}

fn slots(user: &mut User, kind: VerificationKind) -> (&mut Option<String>, &mut Option<DateTime<Utc>>) {
    match kind {
        VerificationKind::EmailVerification => {
            (&mut user.verification_token, &mut user.verification_token_expires)
        }
        VerificationKind::PhoneOtp => (&mut user.phone_otp, &mut user.phone_otp_expires),
        VerificationKind::PasswordReset => (&mut user.reset_token, &mut user.reset_token_expires),
    }
}
