//! 인증 흐름 서비스
//!
//! 로그인, 회원가입, 이메일/전화번호 인증, 비밀번호 재설정, 토큰 갱신을 조합합니다.
//! 개별 단계는 [`UserService`], [`TokenService`], [`MailService`]에 위임하며,
//! 이 서비스는 검증 순서와 상태 전이만 책임집니다.
//!
//! 오류는 감지된 지점에서 그대로 반환되고 보상 롤백은 없습니다. 예를 들어 회원가입 중
//! 사용자 저장 이후 메일 발송이 실패하면 사용자는 저장된 채로 `ExternalServiceError`가 반환됩니다.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    domain::{
        dto::auth::{
            RequestPasswordResetRequest, ResetPasswordRequest, SignInRequest, SignUpRequest,
            VerifyEmailRequest, VerifyPhoneRequest,
        },
        dto::users::CreateUserRequest,
        models::{AuthenticatedUser, RequestContext, TokenPair},
    },
    errors::AppError,
    services::{
        auth::{
            token_service::TokenService,
            verification::{self, VerificationKind},
        },
        mail::MailService,
        users::UserService,
    },
};

const LOG_TARGET: &str = "AuthService";

pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
    mail: Arc<MailService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>, mail: Arc<MailService>) -> Self {
        Self { users, tokens, mail }
    }

    /// 식별자(이메일 또는 전화번호)와 비밀번호로 사용자를 확인하고 클레임 `{id, email}`을 돌려줍니다.
    ///
    /// 사용자가 없는 경우와 비밀번호가 틀린 경우를 구분하지 않습니다.
    pub async fn validate_user(&self, identifier: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let invalid = || AppError::AuthenticationError("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_email_or_phone(identifier)
            .await?
            .ok_or_else(invalid)?;

        if !self.users.validate_password(&user, password)? {
            return Err(invalid());
        }

        Ok(AuthenticatedUser::from(&user))
    }

    pub async fn login(&self, ctx: &RequestContext, request: SignInRequest) -> Result<TokenPair, AppError> {
        let username = request
            .username
            .ok_or_else(|| AppError::ValidationError("Email or phone is required".to_string()))?;

        let identity = match self.validate_user(&username, &request.password).await {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "{} 로그인 실패 (ip={}): {}", ctx, ctx.ip, e);
                return Err(e);
            }
        };

        log::info!(target: LOG_TARGET, "{} 로그인 성공: {}", ctx, identity.id);
        self.tokens.issue(&identity)
    }

    /// 회원가입
    ///
    /// 이메일이 있으면 이메일 인증 토큰(24시간)을, 전화번호가 있으면 OTP(10분)를 발급해
    /// 사용자 행에 저장한 뒤 메일 발송기로 전달합니다.
    pub async fn register(&self, ctx: &RequestContext, request: SignUpRequest) -> Result<TokenPair, AppError> {
        log::info!(target: LOG_TARGET, "{} Starting user registration process", ctx);

        if request.email.is_none() && request.phone.is_none() {
            log::error!(target: LOG_TARGET, "{} Registration failed: Email or phone is required", ctx);
            return Err(AppError::ValidationError("Email or phone is required".to_string()));
        }

        let mut user = self
            .users
            .create(ctx, CreateUserRequest::from(request))
            .await
            .inspect_err(|e| log::error!(target: LOG_TARGET, "{} Registration failed: {}", ctx, e))?;
        log::info!(target: LOG_TARGET, "{} User created successfully with id: {}", ctx, user.id);

        let now = Utc::now();
        let email_token = user
            .email
            .is_some()
            .then(|| verification::issue(&mut user, VerificationKind::EmailVerification, now));
        let phone_otp = user
            .phone
            .is_some()
            .then(|| verification::issue(&mut user, VerificationKind::PhoneOtp, now));

        let user = self.users.save(user).await?;

        let tokens = self.tokens.issue(&AuthenticatedUser::from(&user))?;
        log::info!(target: LOG_TARGET, "{} Generated authentication tokens", ctx);

        if let (Some(email), Some(token)) = (user.email.as_deref(), email_token) {
            self.mail.send_verification_email(email, &token.value).await?;
        }
        if let (Some(phone), Some(otp)) = (user.phone.as_deref(), phone_otp) {
            self.mail.send_phone_otp(phone, &otp.value).await?;
        }

        Ok(tokens)
    }

    pub async fn verify_email(&self, ctx: &RequestContext, request: VerifyEmailRequest) -> Result<(), AppError> {
        let invalid = || AppError::TokenError("Invalid or expired verification token".to_string());

        let mut user = self
            .users
            .find_by_verification_token(&request.token)
            .await?
            .ok_or_else(invalid)?;

        if !verification::is_consumable(&user, VerificationKind::EmailVerification, &request.token, Utc::now()) {
            return Err(invalid());
        }

        user.is_email_verified = true;
        verification::clear(&mut user, VerificationKind::EmailVerification);
        user.activate_if_verified();

        let user = self.users.save(user).await?;
        log::info!(target: LOG_TARGET, "{} 이메일 인증 완료: {}", ctx, user.id);

        Ok(())
    }

    pub async fn verify_phone(&self, ctx: &RequestContext, request: VerifyPhoneRequest) -> Result<(), AppError> {
        let invalid = || AppError::TokenError("Invalid or expired OTP".to_string());

        let mut user = self
            .users
            .find_by_phone(&request.phone)
            .await?
            .ok_or_else(invalid)?;

        if !verification::is_consumable(&user, VerificationKind::PhoneOtp, &request.otp, Utc::now()) {
            return Err(invalid());
        }

        user.is_phone_verified = true;
        verification::clear(&mut user, VerificationKind::PhoneOtp);
        user.activate_if_verified();

        let user = self.users.save(user).await?;
        log::info!(target: LOG_TARGET, "{} 전화번호 인증 완료: {}", ctx, user.id);

        Ok(())
    }

    /// 재설정 토큰(1시간)을 발급합니다. 동시 요청은 직렬화되지 않으며 마지막 저장이 남습니다.
    pub async fn request_password_reset(
        &self,
        ctx: &RequestContext,
        request: RequestPasswordResetRequest,
    ) -> Result<(), AppError> {
        let identifier = request
            .username
            .ok_or_else(|| AppError::ValidationError("Email or phone is required".to_string()))?;

        let mut user = self
            .users
            .find_by_email_or_phone(&identifier)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let issued = verification::issue(&mut user, VerificationKind::PasswordReset, Utc::now());
        let user = self.users.save(user).await?;
        log::info!(target: LOG_TARGET, "{} 비밀번호 재설정 토큰 발급: {}", ctx, user.id);

        self.mail
            .send_password_reset(user.email.as_deref(), user.phone.as_deref(), &issued.value)
            .await
    }

    pub async fn reset_password(&self, ctx: &RequestContext, request: ResetPasswordRequest) -> Result<(), AppError> {
        let invalid = || AppError::TokenError("Invalid or expired reset token".to_string());

        let mut user = self
            .users
            .find_by_reset_token(&request.token)
            .await?
            .ok_or_else(invalid)?;

        if !verification::is_consumable(&user, VerificationKind::PasswordReset, &request.token, Utc::now()) {
            return Err(invalid());
        }

        user.password = self.users.hash_password(&request.password)?;
        verification::clear(&mut user, VerificationKind::PasswordReset);

        let user = self.users.save(user).await?;
        log::info!(target: LOG_TARGET, "{} 비밀번호 재설정 완료: {}", ctx, user.id);

        Ok(())
    }

    /// 리프레시 토큰으로 확인된 사용자에게 새 토큰 쌍을 발급합니다.
    pub async fn refresh_token(&self, identity: &AuthenticatedUser) -> Result<TokenPair, AppError> {
        let current = self
            .users
            .find_identity(identity.id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("User not found".to_string()))?;

        self.tokens.issue(&current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TokenKind;
    use crate::services::mail::Recipient;
    use crate::test_support::{TestServices, test_services};
    use chrono::Duration;

    const PASSWORD: &str = "userPassword123";

    fn sign_up(email: Option<&str>, phone: Option<&str>) -> SignUpRequest {
        SignUpRequest {
            email: email.map(String::from),
            phone: phone.map(String::from),
            password: PASSWORD.to_string(),
            first_name: None,
            last_name: None,
            username: None,
        }
    }

    fn sign_in(username: &str, password: &str) -> SignInRequest {
        SignInRequest {
            username: Some(username.to_string()),
            password: password.to_string(),
        }
    }

    async fn registered(services: &TestServices, email: &str) {
        services
            .auth
            .register(&RequestContext::default(), sign_up(Some(email), None))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_login_returns_token_pair() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        registered(&services, "user@example.com").await;

        let pair = services.auth.login(&ctx, sign_in("user@example.com", PASSWORD)).await.unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        let claims = services.tokens.verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[actix_web::test]
    async fn test_login_with_phone_identifier() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        services.auth.register(&ctx, sign_up(None, Some("+15550001111"))).await.unwrap();

        assert!(services.auth.login(&ctx, sign_in("+15550001111", PASSWORD)).await.is_ok());
    }

    #[actix_web::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        registered(&services, "user@example.com").await;

        let wrong = services.auth.login(&ctx, sign_in("user@example.com", "wrongPassword1")).await;
        let unknown = services.auth.login(&ctx, sign_in("nobody@example.com", PASSWORD)).await;

        assert!(matches!(wrong, Err(AppError::AuthenticationError(_))));
        assert!(matches!(unknown, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_login_without_username_is_validation_error() {
        let services = test_services().await;
        let request = SignInRequest {
            username: None,
            password: PASSWORD.to_string(),
        };

        let result = services.auth.login(&RequestContext::default(), request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_register_without_identifier_persists_nothing() {
        let services = test_services().await;
        let ctx = RequestContext::default();

        let result = services.auth.register(&ctx, sign_up(None, None)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let (_, total) = services.users.get_users(&ctx, 10, 0).await.unwrap();
        assert_eq!(total, 0);
        assert!(services.mail.messages().is_empty());
    }

    #[actix_web::test]
    async fn test_register_sends_email_token_and_otp() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        services
            .auth
            .register(&ctx, sign_up(Some("user@example.com"), Some("+15550001111")))
            .await
            .unwrap();

        let user = services.users.find_by_phone("+15550001111").await.unwrap().unwrap();
        let otp = user.phone_otp.clone().unwrap();
        let email_token = user.verification_token.clone().unwrap();

        let sent = services.mail.messages();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, Recipient::Email("user@example.com".to_string()));
        assert!(sent[0].body.contains(&email_token));
        assert_eq!(sent[1].to, Recipient::Sms("+15550001111".to_string()));
        assert!(sent[1].body.contains(&otp));
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_is_conflict() {
        let services = test_services().await;
        registered(&services, "user@example.com").await;

        let result = services
            .auth
            .register(&RequestContext::default(), sign_up(Some("user@example.com"), None))
            .await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_register_mail_failure_keeps_user() {
        let services = test_services().await;
        services.mail.fail_next();

        let result = services
            .auth
            .register(&RequestContext::default(), sign_up(Some("user@example.com"), None))
            .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
        let user = services.users.find_by_email_or_phone("user@example.com").await.unwrap().unwrap();
        assert!(user.verification_token.is_some());
    }

    #[actix_web::test]
    async fn test_verify_email_activates_user_once() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        registered(&services, "user@example.com").await;
        let token = services
            .users
            .find_by_email_or_phone("user@example.com")
            .await
            .unwrap()
            .unwrap()
            .verification_token
            .unwrap();

        services
            .auth
            .verify_email(&ctx, VerifyEmailRequest { token: token.clone() })
            .await
            .unwrap();

        let user = services.users.find_by_email_or_phone("user@example.com").await.unwrap().unwrap();
        assert!(user.is_email_verified);
        assert!(user.is_active());
        assert!(user.verification_token.is_none());

        let again = services.auth.verify_email(&ctx, VerifyEmailRequest { token }).await;
        assert!(matches!(again, Err(AppError::TokenError(_))));
    }

    #[actix_web::test]
    async fn test_verify_phone_rejects_wrong_otp() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        services.auth.register(&ctx, sign_up(None, Some("+15550001111"))).await.unwrap();
        let otp = services.users.find_by_phone("+15550001111").await.unwrap().unwrap().phone_otp.unwrap();
        let wrong = if otp == "000000" { "111111" } else { "000000" };

        let result = services
            .auth
            .verify_phone(&ctx, VerifyPhoneRequest { phone: "+15550001111".to_string(), otp: wrong.to_string() })
            .await;
        assert!(matches!(result, Err(AppError::TokenError(_))));

        services
            .auth
            .verify_phone(&ctx, VerifyPhoneRequest { phone: "+15550001111".to_string(), otp })
            .await
            .unwrap();
        let user = services.users.find_by_phone("+15550001111").await.unwrap().unwrap();
        assert!(user.is_phone_verified);
        assert!(user.is_verified);
    }

    #[actix_web::test]
    async fn test_reset_token_is_single_use() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        registered(&services, "user@example.com").await;

        services
            .auth
            .request_password_reset(&ctx, RequestPasswordResetRequest { username: Some("user@example.com".to_string()) })
            .await
            .unwrap();
        let token = services
            .users
            .find_by_email_or_phone("user@example.com")
            .await
            .unwrap()
            .unwrap()
            .reset_token
            .unwrap();
        assert!(services.mail.messages().last().unwrap().body.contains(&token));

        let reset = || ResetPasswordRequest {
            token: token.clone(),
            password: "newPassword456".to_string(),
        };

        services.auth.reset_password(&ctx, reset()).await.unwrap();
        let second = services.auth.reset_password(&ctx, reset()).await;
        assert!(matches!(second, Err(AppError::TokenError(_))));

        assert!(services.auth.login(&ctx, sign_in("user@example.com", "newPassword456")).await.is_ok());
        assert!(services.auth.login(&ctx, sign_in("user@example.com", PASSWORD)).await.is_err());
    }

    #[actix_web::test]
    async fn test_expired_reset_token_is_rejected() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        registered(&services, "user@example.com").await;

        let mut user = services.users.find_by_email_or_phone("user@example.com").await.unwrap().unwrap();
        let issued = verification::issue(&mut user, VerificationKind::PasswordReset, Utc::now() - Duration::hours(2));
        services.users.save(user).await.unwrap();

        let result = services
            .auth
            .reset_password(&ctx, ResetPasswordRequest { token: issued.value, password: "newPassword456".to_string() })
            .await;
        assert!(matches!(result, Err(AppError::TokenError(_))));
    }

    #[actix_web::test]
    async fn test_expired_email_token_is_rejected() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        registered(&services, "user@example.com").await;

        let mut user = services.users.find_by_email_or_phone("user@example.com").await.unwrap().unwrap();
        let issued = verification::issue(&mut user, VerificationKind::EmailVerification, Utc::now() - Duration::hours(25));
        services.users.save(user).await.unwrap();

        let result = services.auth.verify_email(&ctx, VerifyEmailRequest { token: issued.value }).await;
        assert!(matches!(result, Err(AppError::TokenError(_))));

        let user = services.users.find_by_email_or_phone("user@example.com").await.unwrap().unwrap();
        assert!(!user.is_email_verified);
        assert!(!user.is_active());
    }

    #[actix_web::test]
    async fn test_expired_otp_is_rejected() {
        let services = test_services().await;
        let ctx = RequestContext::default();
        services.auth.register(&ctx, sign_up(None, Some("+15550001111"))).await.unwrap();

        let mut user = services.users.find_by_phone("+15550001111").await.unwrap().unwrap();
        let issued = verification::issue(&mut user, VerificationKind::PhoneOtp, Utc::now() - Duration::minutes(11));
        services.users.save(user).await.unwrap();

        let result = services
            .auth
            .verify_phone(&ctx, VerifyPhoneRequest { phone: "+15550001111".to_string(), otp: issued.value })
            .await;
        assert!(matches!(result, Err(AppError::TokenError(_))));

        let user = services.users.find_by_phone("+15550001111").await.unwrap().unwrap();
        assert!(!user.is_phone_verified);
    }

    #[actix_web::test]
    async fn test_request_password_reset_errors() {
        let services = test_services().await;
        let ctx = RequestContext::default();

        let missing = services
            .auth
            .request_password_reset(&ctx, RequestPasswordResetRequest { username: None })
            .await;
        let unknown = services
            .auth
            .request_password_reset(&ctx, RequestPasswordResetRequest { username: Some("ghost@example.com".to_string()) })
            .await;

        assert!(matches!(missing, Err(AppError::ValidationError(_))));
        assert!(matches!(unknown, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_refresh_token_for_missing_user_is_unauthorized() {
        let services = test_services().await;
        let ghost = AuthenticatedUser {
            id: uuid::Uuid::new_v4(),
            email: None,
        };

        let result = services.auth.refresh_token(&ghost).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
