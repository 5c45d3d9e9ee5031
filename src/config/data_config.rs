//! 실행 환경, 서버, 비밀번호 해싱, 데이터베이스 설정

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `APP_ENV`(없으면 `ENVIRONMENT`) 환경 변수로 현재 실행 환경을 결정합니다.
    ///
    /// 값이 없거나 알 수 없는 값이면 `Development`로 간주합니다.
    pub fn current() -> Self {
        env::var("APP_ENV")
            .or_else(|_| env::var("ENVIRONMENT"))
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Development)
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            "test" | "testing" => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost
    ///
    /// `BCRYPT_COST`가 4..=15 범위면 그대로 사용하고, 그렇지 않으면 실행 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
            log::warn!("BCRYPT_COST 값이 올바르지 않습니다: {} (허용 범위 4-15)", cost_str);
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// API 전역 prefix. 앞뒤 `/`는 제거된 형태로 반환합니다. (기본값: `api/v1`)
    pub fn api_prefix() -> String {
        let prefix = env::var("API_PREFIX").unwrap_or_else(|_| "api/v1".to_string());
        normalize_prefix(&prefix)
    }

    pub fn workers() -> usize {
        env::var("HTTP_WORKERS")
            .ok()
            .and_then(|workers| workers.parse().ok())
            .filter(|workers: &usize| *workers > 0)
            .unwrap_or(4)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    prefix.trim().trim_matches('/').to_string()
}

/// 관계형 데이터베이스 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// 접속 URL
    ///
    /// `DATABASE_URL`이 있으면 우선 사용하고, 없으면 `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASS`/`DB_NAME`으로
    /// postgres URL을 조립합니다. `DB_SSL=true`면 `sslmode=require`를 붙입니다.
    pub fn url() -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
        let pass = env::var("DB_PASS").unwrap_or_default();
        let name = env::var("DB_NAME").unwrap_or_else(|_| "storefront_dev".to_string());

        build_postgres_url(&host, &port, &user, &pass, &name, Self::ssl())
    }

    /// 부팅 시 엔티티 기준으로 누락된 테이블을 생성할지 여부 (`DB_SYNC`)
    pub fn sync_schema() -> bool {
        env_flag("DB_SYNC")
    }

    /// SQL 구문 로깅 여부 (`DB_LOG`)
    pub fn logging() -> bool {
        env_flag("DB_LOG")
    }

    pub fn ssl() -> bool {
        env_flag("DB_SSL")
    }

    pub fn max_connections() -> u32 {
        env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(10)
    }
}

fn build_postgres_url(host: &str, port: &str, user: &str, pass: &str, name: &str, ssl: bool) -> String {
    let credentials = if pass.is_empty() {
        urlencoding::encode(user).into_owned()
    } else {
        format!("{}:{}", urlencoding::encode(user), urlencoding::encode(pass))
    };

    let mut url = format!("postgres://{}@{}:{}/{}", credentials, host, port, name);
    if ssl {
        url.push_str("?sslmode=require");
    }
    url
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}
