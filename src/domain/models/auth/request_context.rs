use std::fmt;
use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use super::authenticated_user::AuthenticatedUser;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 요청 단위 컨텍스트
///
/// 서비스 계층에 명시적으로 전달되어 로그에 요청 ID와 호출자를 남기는 데 사용됩니다.
/// 요청 ID 헤더가 없으면 새 UUID를 발급합니다.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub url: String,
    pub ip: String,
    pub user: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request_id,
            url: req.uri().to_string(),
            ip: extract_client_ip(req).unwrap_or_default(),
            user: req.extensions().get::<AuthenticatedUser>().cloned(),
        }
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.request_id.is_empty() {
            write!(f, "[-]")
        } else {
            write!(f, "[{}]", self.request_id)
        }
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(RequestContext::from_http_request(req)))
    }
}

/// 프록시 헤더를 우선 확인하고, 없으면 peer 주소를 사용합니다.
fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    // X-Forwarded-For 체인의 첫 번째가 원본 클라이언트
    if let Some(forwarded_for) = header_str(req, "X-Forwarded-For") {
        if let Some(first_ip) = forwarded_for.split(',').map(str::trim).find(|ip| !ip.is_empty()) {
            return Some(first_ip.to_string());
        }
    }

    for header in ["X-Real-IP", "CF-Connecting-IP"] {
        if let Some(ip) = header_str(req, header) {
            return Some(ip.to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
