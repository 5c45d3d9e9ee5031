//! 서비스 상태 엔드포인트 (API prefix 밖)

use std::time::Instant;

use actix_web::{get, HttpResponse};
use once_cell::sync::Lazy;
use serde_json::json;

static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// 서버 기동 시각을 고정합니다. `main`에서 한 번 호출합니다.
pub fn mark_started() {
    Lazy::force(&STARTED_AT);
}

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Storefront API is running",
    }))
}

#[get("/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "pong",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 로드밸런서/모니터링용 헬스체크. `uptime`은 초 단위입니다.
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "uptime": STARTED_AT.elapsed().as_secs_f64(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
