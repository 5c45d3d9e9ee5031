//! 비즈니스 로직 서비스 계층
//!
//! 서비스는 생성자로 의존성을 받고 `Arc`로 공유됩니다. 조립은
//! [`ServiceContainer`](crate::core::ServiceContainer)에서 한 번만 이루어집니다.
//!
//! ```rust,ignore
//! let users = Arc::new(UserService::new(user_repo, bcrypt_cost));
//! let auth = AuthService::new(users.clone(), tokens.clone(), mail.clone());
//! ```

pub mod auth;
pub mod mail;
pub mod products;
pub mod users;
