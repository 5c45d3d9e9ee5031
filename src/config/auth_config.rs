use std::env;

use chrono::{Duration, Utc};

use crate::config::Environment;
use crate::errors::{AppError, AppResult};

const DEFAULT_ACCESS_EXPIRATION: &str = "15m";
const DEFAULT_REFRESH_EXPIRATION: &str = "7d";

/// JWT 설정
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 시크릿과 만료 시간으로 서명됩니다.
///
/// | 변수 | 기본값 |
/// |------|--------|
/// | `JWT_SECRET` | (production 필수) |
/// | `JWT_EXPIRATION` | `15m` |
/// | `JWT_REFRESH_SECRET` | (production 필수) |
/// | `JWT_REFRESH_EXPIRATION` | `7d` |
pub struct JwtConfig;

impl JwtConfig {
    /// 환경 변수에서 [`JwtSettings`]를 구성합니다.
    ///
    /// production 환경에서 시크릿이 비어 있으면 에러를 반환하고, 그 외 환경에서는 경고 후 개발용 값을 사용합니다.
    pub fn settings() -> AppResult<JwtSettings> {
        let environment = Environment::current();

        let secret = required_secret("JWT_SECRET", "dev-access-secret", &environment)?;
        let refresh_secret = required_secret("JWT_REFRESH_SECRET", "dev-refresh-secret", &environment)?;

        let expires_in = duration_var("JWT_EXPIRATION", DEFAULT_ACCESS_EXPIRATION)?;
        let refresh_expires_in = duration_var("JWT_REFRESH_EXPIRATION", DEFAULT_REFRESH_EXPIRATION)?;

        Ok(JwtSettings {
            secret,
            expires_in,
            refresh_secret,
            refresh_expires_in,
        })
    }
}

/// 토큰 서명에 필요한 값 묶음
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// 액세스 토큰 만료 (초)
    pub expires_in: i64,
    pub refresh_secret: String,
    /// 리프레시 토큰 만료 (초)
    pub refresh_expires_in: i64,
}

fn required_secret(key: &str, fallback: &str, environment: &Environment) -> AppResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ if environment.is_production() => {
            Err(AppError::InternalError(format!("{} 환경 변수가 설정되지 않았습니다", key)))
        }
        _ => {
            log::warn!("{} not set, using default (not secure for production!)", key);
            Ok(fallback.to_string())
        }
    }
}

fn duration_var(key: &str, default: &str) -> AppResult<i64> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    parse_duration(&raw).ok_or_else(|| {
        AppError::InternalError(format!("{} 값을 해석할 수 없습니다: {}", key, raw))
    })
}

/// `90`, `90s`, `15m`, `12h`, `7d` 형식의 기간을 초 단위로 변환합니다.
///
/// 현재 시각에 더했을 때 날짜 범위를 넘는 값은 거부합니다.
pub fn parse_duration(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.char_indices().last()? {
        (idx, 's') => (&raw[..idx], 1),
        (idx, 'm') => (&raw[..idx], 60),
        (idx, 'h') => (&raw[..idx], 60 * 60),
        (idx, 'd') => (&raw[..idx], 24 * 60 * 60),
        _ => (raw, 1),
    };

    let value: i64 = digits.trim().parse().ok()?;
    if value <= 0 {
        return None;
    }
    let seconds = value.checked_mul(multiplier)?;

    Duration::try_seconds(seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .map(|_| seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("3600"), Some(3600));
        assert_eq!(parse_duration("45s"), Some(45));
        assert_eq!(parse_duration("15m"), Some(900));
        assert_eq!(parse_duration("2h"), Some(7200));
        assert_eq!(parse_duration("7d"), Some(604_800));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("10w"), None);
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("-5m"), None);
    }

    #[test]
    fn test_parse_duration_rejects_out_of_range() {
        assert_eq!(parse_duration("9223372036854775807"), None);
        assert_eq!(parse_duration("9223372036854775807d"), None);
        assert_eq!(parse_duration("300000000d"), None);
        assert_eq!(parse_duration("3650d"), Some(3650 * 24 * 60 * 60));
    }

    #[test]
    fn test_missing_secret_falls_back_outside_production() {
        let secret = required_secret("STOREFRONT_UNSET_SECRET_FOR_TEST", "fallback", &Environment::Test).unwrap();
        assert_eq!(secret, "fallback");
    }

    #[test]
    fn test_missing_secret_fails_in_production() {
        let result = required_secret("STOREFRONT_UNSET_SECRET_FOR_TEST", "fallback", &Environment::Production);
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
