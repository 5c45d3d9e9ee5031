//! # 사용자 관리 서비스
//!
//! 사용자 생성(비밀번호 해싱), 조회, 프로필 수정, 비밀번호 검증을 담당합니다.
//! 인증 흐름([`AuthService`](crate::services::auth::AuthService))과 사용자 API 핸들러가
//! 함께 사용합니다.
//!
//! ```text
//! Handler / AuthService
//!         │
//!         ▼
//!   UserService ── bcrypt (hash / verify)
//!         │
//!         ▼
//!   UserRepository ── sea-orm + (선택) Redis 캐시
//! ```
//!
//! 비밀번호 해시는 이 계층 밖으로 나가지 않습니다. 외부 응답은 항상 [`UserResponse`]를 거칩니다.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::{
    domain::{
        dto::{
            common::page_offset,
            users::{CreateUserRequest, UpdateUserRequest, UserResponse},
        },
        entities::users::{NewUser, User},
        models::{AuthenticatedUser, RequestContext},
    },
    errors::{AppError, ErrorContext},
    repositories::users::UserRepository,
    utils::string_utils::normalize_identifier,
};

const LOG_TARGET: &str = "UserService";

pub struct UserService {
    user_repo: Arc<UserRepository>,
    /// bcrypt cost. 운영은 `PasswordConfig::bcrypt_cost()`, 테스트는 최소값(4)을 사용합니다.
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>, bcrypt_cost: u32) -> Self {
        Self { user_repo, bcrypt_cost }
    }

    /// 새 사용자 계정 생성
    ///
    /// 이메일과 전화번호 중 하나는 반드시 있어야 하며, 이 검사는 저장 전에 이루어집니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 이메일/전화번호가 모두 없음
    /// * `ConflictError` - 이메일 또는 전화번호 중복
    /// * `InternalError` - 해싱 실패
    pub async fn create(&self, ctx: &RequestContext, request: CreateUserRequest) -> Result<User, AppError> {
        let start_time = Instant::now();

        if request.email.is_none() && request.phone.is_none() {
            return Err(AppError::ValidationError(
                "이메일 또는 전화번호 중 하나는 필수입니다".to_string(),
            ));
        }

        let password_hash = self.hash_password(&request.password)?;

        let new_user = NewUser {
            email: request.email.as_deref().map(normalize_identifier),
            phone: request.phone,
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
        };

        let created = self.user_repo.create(new_user).await?;

        log::info!(
            target: LOG_TARGET,
            "{} 사용자 생성: {} (총 {:?})",
            ctx,
            created.id,
            start_time.elapsed()
        );

        Ok(created)
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hash_start = Instant::now();
        let password_hash = bcrypt::hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;

        log::debug!(target: LOG_TARGET, "Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }

    /// 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다.
    pub fn validate_password(&self, user: &User, password: &str) -> Result<bool, AppError> {
        let verify_start = Instant::now();
        let is_valid = bcrypt::verify(password, &user.password).context("비밀번호 검증 실패")?;

        log::debug!(target: LOG_TARGET, "Password verification took: {:?}", verify_start.elapsed());
        Ok(is_valid)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 존재 여부만 확인할 때 사용합니다. 없으면 `None`.
    /// 토큰 전략과 토큰 갱신이 쓰는 `{id, email}` 조회
    pub async fn find_identity(&self, id: Uuid) -> Result<Option<AuthenticatedUser>, AppError> {
        self.user_repo.find_identity(id).await
    }

    pub async fn find_by_email_or_phone(&self, identifier: &str) -> Result<Option<User>, AppError> {
        self.user_repo
            .find_by_email_or_phone(&normalize_identifier(identifier))
            .await
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_phone(phone.trim()).await
    }

    pub async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_verification_token(token).await
    }

    pub async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_reset_token(token).await
    }

    pub async fn save(&self, user: User) -> Result<User, AppError> {
        self.user_repo.save(user).await
    }

    /// 0부터 시작하는 페이지 목록. `(사용자 목록, 전체 수)`를 반환합니다.
    pub async fn get_users(
        &self,
        ctx: &RequestContext,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<UserResponse>, u64), AppError> {
        let offset = page_offset(page, limit)?;
        let (users, total) = self.user_repo.find_page(offset, limit).await?;

        log::debug!(
            target: LOG_TARGET,
            "{} 사용자 목록 조회: page={} limit={} total={}",
            ctx,
            page,
            limit,
            total
        );

        Ok((users.into_iter().map(UserResponse::from).collect(), total))
    }

    /// 전달된 필드만 반영하는 프로필 수정
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<User, AppError> {
        let mut user = self.find_by_id(id).await?;

        if request.is_empty() {
            return Ok(user);
        }

        if let Some(first_name) = request.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = request.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(username) = request.username {
            user.username = Some(username);
        }

        let saved = self.user_repo.save(user).await?;
        log::info!(target: LOG_TARGET, "{} 사용자 프로필 수정: {}", ctx, saved.id);

        Ok(saved)
    }
}
