//! 미들웨어 모듈
//!
//! 토큰 전략(액세스/리프레시)을 라우트 단위로 적용합니다.
//!
//! ```rust,ignore
//! web::scope("/auth")
//!     .service(web::resource("/me").wrap(AuthMiddleware::access()).route(web::get().to(me)))
//!     .service(web::resource("/refresh").wrap(AuthMiddleware::refresh()).route(web::post().to(refresh)))
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
