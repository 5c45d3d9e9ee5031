//! 사용자 데이터 접근 계층
//!
//! 토큰 전략이 쓰는 신원 조회(`{id, email}`)는 Redis가 설정된 경우 `user:identity:{id}` 키로
//! 10분간 캐시되며, 저장 시마다 무효화됩니다. 비밀번호 해시와 인증 토큰이 있는 전체 행은
//! 캐시하지 않습니다. 캐시 오류는 조회 실패로 이어지지 않습니다.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    caching::redis::RedisClient,
    db::Database,
    domain::{
        entities::users::{NewUser, User, Users, user},
        models::AuthenticatedUser,
    },
    errors::AppError,
};

const CACHE_TTL_SECONDS: u64 = 600;

pub struct UserRepository {
    db: DatabaseConnection,
    redis: Option<Arc<RedisClient>>,
}

impl UserRepository {
    pub fn new(database: &Database, redis: Option<Arc<RedisClient>>) -> Self {
        Self {
            db: database.connection().clone(),
            redis,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자 존재 확인용 `{id, email}` 조회. 이 projection만 캐시됩니다.
    pub async fn find_identity(&self, id: Uuid) -> Result<Option<AuthenticatedUser>, AppError> {
        let cache_key = Self::cache_key(id);

        if let Some(redis) = &self.redis {
            if let Ok(Some(cached)) = redis.get::<AuthenticatedUser>(&cache_key).await {
                return Ok(Some(cached));
            }
        }

        let identity = self.find_by_id(id).await?.map(|user| AuthenticatedUser::from(&user));

        if let (Some(redis), Some(identity)) = (&self.redis, &identity) {
            if let Err(e) = redis.set_with_expiry(&cache_key, identity, CACHE_TTL_SECONDS).await {
                log::warn!("사용자 캐시 저장 실패 ({}): {}", cache_key, e);
            }
        }

        Ok(identity)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one(user::Column::Email.eq(email)).await
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        self.find_one(user::Column::Phone.eq(phone)).await
    }

    /// 이메일 또는 전화번호가 일치하는 사용자
    pub async fn find_by_email_or_phone(&self, identifier: &str) -> Result<Option<User>, AppError> {
        let condition = Condition::any()
            .add(user::Column::Email.eq(identifier))
            .add(user::Column::Phone.eq(identifier));

        self.find_one(condition).await
    }

    pub async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, AppError> {
        self.find_one(user::Column::VerificationToken.eq(token)).await
    }

    pub async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AppError> {
        self.find_one(user::Column::ResetToken.eq(token)).await
    }

    /// 최근 가입 순 페이지 조회. `(사용자 목록, 전체 수)`를 반환합니다.
    pub async fn find_page(&self, offset: u64, limit: u64) -> Result<(Vec<User>, u64), AppError> {
        let total = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let users = Users::find()
            .order_by_desc(user::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((users, total))
    }

    /// 새 사용자를 저장합니다. 이메일/전화번호가 이미 있으면 `ConflictError`.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        if let Some(email) = new_user.email.as_deref() {
            if self.find_by_email(email).await?.is_some() {
                return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
            }
        }

        if let Some(phone) = new_user.phone.as_deref() {
            if self.find_by_phone(phone).await?.is_some() {
                return Err(AppError::ConflictError("이미 사용 중인 전화번호입니다".to_string()));
            }
        }

        new_user
            .into_active_model()
            .insert(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자 행 전체를 한 번의 UPDATE로 저장합니다.
    ///
    /// 토큰 소비처럼 상태 변경과 토큰 무효화를 함께 반영해야 하는 경우에 사용합니다.
    pub async fn save(&self, mut user: User) -> Result<User, AppError> {
        user.updated_at = Utc::now();

        let saved = user::ActiveModel::from(user)
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_cache(saved.id).await;
        Ok(saved)
    }

    async fn find_one<F>(&self, filter: F) -> Result<Option<User>, AppError>
    where
        F: sea_orm::sea_query::IntoCondition,
    {
        Users::find()
            .filter(filter)
            .one(&self.db)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn invalidate_cache(&self, id: Uuid) {
        if let Some(redis) = &self.redis {
            let cache_key = Self::cache_key(id);
            if let Err(e) = redis.del(&cache_key).await {
                log::warn!("사용자 캐시 무효화 실패 ({}): {}", cache_key, e);
            }
        }
    }

    fn cache_key(id: Uuid) -> String {
        format!("user:identity:{}", id)
    }
}
