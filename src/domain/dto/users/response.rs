use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::users::{User, UserState};

/// 외부로 노출되는 사용자 정보. 비밀번호 해시와 인증 토큰은 포함하지 않습니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub state: UserState,
    pub is_verified: bool,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            phone,
            first_name,
            last_name,
            username,
            state,
            is_verified,
            is_email_verified,
            is_phone_verified,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            email,
            phone,
            first_name,
            last_name,
            username,
            state,
            is_verified,
            is_email_verified,
            is_phone_verified,
            created_at,
            updated_at,
        }
    }
}
