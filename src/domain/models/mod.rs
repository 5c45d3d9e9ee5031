pub mod auth;
pub mod token;

pub use auth::{AuthenticatedUser, RequestContext};
pub use token::{TokenClaims, TokenKind, TokenPair};
