use std::env;

/// 트랜잭션 메일/SMS 발송 설정
///
/// `MAIL_API_URL`과 `MAIL_API_KEY`가 모두 있어야 실제 발송이 활성화되고,
/// 그렇지 않으면 로그로만 남기는 발송기가 사용됩니다.
pub struct MailConfig;

impl MailConfig {
    pub fn api_url() -> Option<String> {
        non_empty("MAIL_API_URL")
    }

    pub fn api_key() -> Option<String> {
        non_empty("MAIL_API_KEY")
    }

    /// SMS 발송 엔드포인트. 없으면 OTP는 로그로만 남습니다.
    pub fn sms_api_url() -> Option<String> {
        non_empty("MAIL_SMS_API_URL")
    }

    pub fn from_address() -> String {
        non_empty("MAIL_FROM").unwrap_or_else(|| "no-reply@localhost".to_string())
    }

    /// 메일 본문 링크의 기준 URL
    pub fn app_url() -> String {
        non_empty("APP_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| "http://localhost:3000".to_string())
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
