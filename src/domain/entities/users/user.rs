//! 사용자 엔티티 (`users` 테이블)
//!
//! 이메일/전화번호 인증 토큰과 비밀번호 재설정 토큰은 별도 테이블 없이 사용자 행에 저장됩니다.
//! 종류별로 미사용 토큰은 최대 하나이며, 새로 발급하면 이전 값을 덮어씁니다.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// 계정 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    /// 이메일 또는 전화번호 인증 완료
    #[sea_orm(string_value = "active")]
    Active,
    /// 가입 직후, 인증 대기
    #[sea_orm(string_value = "pending")]
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: Option<String>,

    #[sea_orm(unique)]
    pub phone: Option<String>,

    /// bcrypt 해시
    pub password: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,

    pub state: UserState,
    pub is_verified: bool,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,

    pub verification_token: Option<String>,
    pub verification_token_expires: Option<DateTimeUtc>,

    pub phone_otp: Option<String>,
    pub phone_otp_expires: Option<DateTimeUtc>,

    pub reset_token: Option<String>,
    pub reset_token_expires: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// 신규 사용자 행 생성에 필요한 값
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl NewUser {
    /// `pending` 상태의 ActiveModel로 변환합니다.
    pub fn into_active_model(self) -> ActiveModel {
        let now = Utc::now();

        ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(self.email),
            phone: Set(self.phone),
            password: Set(self.password_hash),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            username: Set(self.username),
            state: Set(UserState::Pending),
            is_verified: Set(false),
            is_email_verified: Set(false),
            is_phone_verified: Set(false),
            verification_token: Set(None),
            verification_token_expires: Set(None),
            phone_otp: Set(None),
            phone_otp_expires: Set(None),
            reset_token: Set(None),
            reset_token_expires: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

impl Model {
    pub fn is_active(&self) -> bool {
        self.state == UserState::Active
    }

    /// 이메일 또는 전화번호 인증이 끝나면 계정을 활성화합니다.
    pub fn activate_if_verified(&mut self) {
        if self.is_email_verified || self.is_phone_verified {
            self.is_verified = true;
            self.state = UserState::Active;
        }
    }
}
