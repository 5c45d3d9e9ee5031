pub mod authenticated_user;
pub mod request_context;

pub use authenticated_user::AuthenticatedUser;
pub use request_context::RequestContext;
