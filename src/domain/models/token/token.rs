use serde::{Deserialize, Serialize};

/// 토큰 종류. 종류마다 서명 시크릿과 만료 시간이 다릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT 페이로드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID
    pub sub: String,
    pub email: Option<String>,
    /// 같은 시크릿을 쓰더라도 액세스/리프레시 토큰이 서로 대체되지 않도록 종류를 함께 서명
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인/회원가입/갱신 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
