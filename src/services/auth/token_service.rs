//! JWT 발급/검증 서비스
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 시크릿과 만료 시간으로 서명되며,
//! 토큰 종류(`typ`)도 함께 서명되어 한 종류의 토큰이 다른 종류로 통과하지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::domain::models::{AuthenticatedUser, TokenClaims, TokenKind, TokenPair};
use crate::errors::AppError;

pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// 클레임 `{id, email}`로 액세스/리프레시 토큰 쌍을 발급합니다. 부수 효과는 없습니다.
    pub fn issue(&self, identity: &AuthenticatedUser) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.sign(identity, TokenKind::Access)?,
            refresh_token: self.sign(identity, TokenKind::Refresh)?,
        })
    }

    pub fn sign(&self, identity: &AuthenticatedUser, kind: TokenKind) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = Duration::try_seconds(self.lifetime(kind))
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::InternalError(format!("{} 토큰 만료 시간이 범위를 벗어났습니다", kind.as_str()))
            })?;

        let claims = TokenClaims {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            typ: kind,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret(kind).as_bytes());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("{} 토큰 생성 실패: {}", kind.as_str(), e)))
    }

    /// 서명과 만료를 검증하고 클레임을 반환합니다. 실패는 모두 `AuthenticationError`입니다.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret(kind).as_bytes());
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
            })?;

        if claims.typ != kind {
            return Err(AppError::AuthenticationError("토큰 종류가 올바르지 않습니다".to_string()));
        }

        Ok(claims)
    }

    /// 검증된 클레임에서 사용자 ID를 꺼냅니다.
    pub fn subject(claims: &TokenClaims) -> Result<Uuid, AppError> {
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()))
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }

    fn secret(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.settings.secret,
            TokenKind::Refresh => &self.settings.refresh_secret,
        }
    }

    fn lifetime(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.settings.expires_in,
            TokenKind::Refresh => self.settings.refresh_expires_in,
        }
    }
}
