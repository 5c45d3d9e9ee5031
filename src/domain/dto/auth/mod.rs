pub mod request;

pub use request::{
    RequestPasswordResetRequest, ResetPasswordRequest, SignInRequest, SignUpRequest,
    VerifyEmailRequest, VerifyPhoneRequest,
};
