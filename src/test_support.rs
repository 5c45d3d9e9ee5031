//! 테스트 공용 픽스처
//!
//! 인메모리 SQLite, 발송 내용을 기록하는 메일 발송기, 조립된 서비스 묶음을 제공합니다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    config::JwtSettings,
    core::ServiceContainer,
    db::Database,
    domain::{entities::users::User, models::RequestContext},
    errors::AppError,
    repositories::{products::ProductRepository, users::UserRepository},
    services::{
        auth::{AuthService, TokenService},
        mail::{MailSender, MailService, OutboundMessage},
        products::ProductService,
        users::UserService,
    },
};

pub const TEST_BCRYPT_COST: u32 = 4;
pub const TEST_PASSWORD: &str = "userPassword123";

pub async fn memory_database() -> Database {
    let database = Database::in_memory().await.expect("in-memory sqlite");
    database.sync_schema().await.expect("schema sync");
    database
}

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "test-access-secret".to_string(),
        expires_in: 900,
        refresh_secret: "test-refresh-secret".to_string(),
        refresh_expires_in: 604_800,
    }
}

/// 발송된 메시지를 순서대로 기록합니다. `fail_next` 이후 한 번은 실패합니다.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<OutboundMessage>>,
    fail_next: AtomicBool,
}

impl RecordingSender {
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailSender for RecordingSender {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError("mail api unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub async fn user_service() -> UserService {
    let database = memory_database().await;
    UserService::new(Arc::new(UserRepository::new(&database, None)), TEST_BCRYPT_COST)
}

pub async fn product_service() -> ProductService {
    let database = memory_database().await;
    ProductService::new(Arc::new(ProductRepository::new(&database)))
}

/// 하나의 인메모리 DB를 공유하는 전체 서비스 묶음
pub struct TestServices {
    pub container: ServiceContainer,
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub mail: Arc<RecordingSender>,
}

impl TestServices {
    /// 비밀번호 `TEST_PASSWORD`로 가입된 사용자
    pub async fn seed_user(&self, email: &str) -> User {
        self.users
            .create(
                &RequestContext::default(),
                crate::domain::dto::users::CreateUserRequest {
                    email: Some(email.to_string()),
                    phone: None,
                    password: TEST_PASSWORD.to_string(),
                    first_name: None,
                    last_name: None,
                    username: None,
                },
            )
            .await
            .expect("seed user")
    }
}

pub async fn test_services() -> TestServices {
    let database = memory_database().await;
    let mail = Arc::new(RecordingSender::default());

    let container = ServiceContainer::new(
        &database,
        None,
        MailService::new(mail.clone(), "http://localhost:3000"),
        jwt_settings(),
        TEST_BCRYPT_COST,
    );

    TestServices {
        users: container.users.clone(),
        tokens: container.tokens.clone(),
        auth: container.auth.clone(),
        container,
        mail,
    }
}

/// 테스트 서비스 묶음과 `api/v1` 라우트로 앱을 초기화합니다.
macro_rules! init_test_app {
    ($services:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| $services.container.configure(cfg))
                .configure(|cfg| $crate::routes::configure_routes(cfg, "api/v1")),
        )
        .await
    };
}

pub(crate) use init_test_app;
