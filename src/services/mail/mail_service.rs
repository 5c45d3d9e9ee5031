//! 인증 토큰 전달(메일/SMS)
//!
//! [`MailService`]는 메시지 내용을 구성하고, 실제 전달은 [`MailSender`] 구현체에 위임합니다.
//!
//! - [`HttpMailSender`]: 트랜잭션 메일 HTTP API (`MAIL_API_URL`, `MAIL_API_KEY`)
//! - [`LogMailSender`]: 설정이 없을 때 사용하는 개발용 발송기. 내용을 로그로만 남깁니다.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;
use crate::errors::AppError;

const LOG_TARGET: &str = "MailService";

/// 수신 채널
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Email(String),
    Sms(String),
}

/// 발송할 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: Recipient,
    pub subject: String,
    pub body: String,
}

/// 메시지 전달 수단
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), AppError>;
}

/// 인증 관련 메시지 구성 및 발송
pub struct MailService {
    sender: Arc<dyn MailSender>,
    app_url: String,
}

impl MailService {
    pub fn new(sender: Arc<dyn MailSender>, app_url: impl Into<String>) -> Self {
        Self {
            sender,
            app_url: app_url.into(),
        }
    }

    /// 환경 변수 설정에 따라 HTTP 발송기 또는 로그 발송기를 선택합니다.
    pub fn from_env() -> Self {
        let sender: Arc<dyn MailSender> = match (MailConfig::api_url(), MailConfig::api_key()) {
            (Some(api_url), Some(api_key)) => {
                log::info!(target: LOG_TARGET, "📧 메일 API 발송 활성화: {}", api_url);
                Arc::new(HttpMailSender::new(
                    api_url,
                    MailConfig::sms_api_url(),
                    api_key,
                    MailConfig::from_address(),
                ))
            }
            _ => {
                log::warn!(target: LOG_TARGET, "MAIL_API_URL/MAIL_API_KEY 미설정: 메일 내용은 로그로만 기록됩니다");
                Arc::new(LogMailSender)
            }
        };

        Self::new(sender, MailConfig::app_url())
    }

    pub async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), AppError> {
        let link = format!("{}/verify-email?token={}", self.app_url, urlencoding::encode(token));

        self.sender
            .deliver(&OutboundMessage {
                to: Recipient::Email(to.to_string()),
                subject: "Verify your email address".to_string(),
                body: format!(
                    "Confirm your email address by opening the link below. It expires in 24 hours.\n\n{}",
                    link
                ),
            })
            .await
    }

    pub async fn send_phone_otp(&self, phone: &str, otp: &str) -> Result<(), AppError> {
        self.sender
            .deliver(&OutboundMessage {
                to: Recipient::Sms(phone.to_string()),
                subject: "Verification code".to_string(),
                body: format!("Your verification code is {}. It expires in 10 minutes.", otp),
            })
            .await
    }

    /// 이메일이 있으면 재설정 링크를, 전화번호만 있으면 SMS로 토큰을 보냅니다.
    pub async fn send_password_reset(&self, email: Option<&str>, phone: Option<&str>, token: &str) -> Result<(), AppError> {
        let message = match (email, phone) {
            (Some(email), _) => OutboundMessage {
                to: Recipient::Email(email.to_string()),
                subject: "Reset your password".to_string(),
                body: format!(
                    "A password reset was requested for your account. The link expires in 1 hour.\n\n{}/reset-password?token={}",
                    self.app_url,
                    urlencoding::encode(token)
                ),
            },
            (None, Some(phone)) => OutboundMessage {
                to: Recipient::Sms(phone.to_string()),
                subject: "Password reset".to_string(),
                body: format!("Your password reset token is {}. It expires in 1 hour.", token),
            },
            (None, None) => {
                return Err(AppError::InternalError(
                    "재설정 토큰을 전달할 연락처가 없습니다".to_string(),
                ));
            }
        };

        self.sender.deliver(&message).await
    }
}

/// 개발용 발송기
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), AppError> {
        log::info!(
            target: LOG_TARGET,
            "✉️ [미발송] to={:?} subject={:?}\n{}",
            message.to,
            message.subject,
            message.body
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress {
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: EmailAddress,
    to: Vec<EmailAddress>,
    subject: String,
    text_content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsBody {
    sender: String,
    recipient: String,
    content: String,
}

/// 트랜잭션 메일 HTTP API 발송기
pub struct HttpMailSender {
    client: reqwest::Client,
    email_url: String,
    sms_url: Option<String>,
    api_key: String,
    from: String,
}

impl HttpMailSender {
    pub fn new(email_url: String, sms_url: Option<String>, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            email_url,
            sms_url,
            api_key,
            from,
        }
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<(), AppError> {
        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 API 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "메일 API 응답 오류 ({}): {}",
                status, error_text
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), AppError> {
        match &message.to {
            Recipient::Email(email) => {
                let body = SendEmailBody {
                    sender: EmailAddress { email: self.from.clone() },
                    to: vec![EmailAddress { email: email.clone() }],
                    subject: message.subject.clone(),
                    text_content: message.body.clone(),
                };
                self.post(&self.email_url, &body).await
            }
            Recipient::Sms(phone) => match &self.sms_url {
                Some(sms_url) => {
                    let body = SendSmsBody {
                        sender: self.from.clone(),
                        recipient: phone.clone(),
                        content: message.body.clone(),
                    };
                    self.post(sms_url, &body).await
                }
                None => {
                    log::warn!(target: LOG_TARGET, "MAIL_SMS_API_URL 미설정: {} 로의 SMS는 로그로만 기록됩니다", phone);
                    LogMailSender.deliver(message).await
                }
            },
        }
    }
}
