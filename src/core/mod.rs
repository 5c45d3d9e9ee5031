//! # Core Module
//!
//! 의존성 조립을 담당합니다.
//!
//! ```rust,ignore
//! let container = ServiceContainer::new(&database, redis, MailService::from_env(), jwt, cost);
//!
//! HttpServer::new(move || {
//!     let container = container.clone();
//!     App::new()
//!         .configure(|cfg| container.configure(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod container;

pub use container::ServiceContainer;
