//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 선택적 캐시입니다. `REDIS_URL`이 없으면 캐시 없이 동작합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! if let Some(cache) = RedisClient::from_env().await? {
//!     cache.set_with_expiry("user:id:42", &user, 600).await?;
//!     let cached: Option<User> = cache.get("user:id:42").await?;
//! }
//! ```

pub mod redis;
