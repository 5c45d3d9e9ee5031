//! 서비스 컨테이너
//!
//! 애플리케이션 시작 시 리포지토리와 서비스를 한 번 조립하고, actix 워커마다
//! 같은 인스턴스를 `web::Data`로 등록합니다. 전역 상태나 런타임 조회 없이
//! 생성자 인자로만 의존성이 전달됩니다.

use std::sync::Arc;

use actix_web::web;

use crate::{
    caching::redis::RedisClient,
    config::JwtSettings,
    db::Database,
    repositories::{products::ProductRepository, users::UserRepository},
    services::{
        auth::{AuthService, TokenService},
        mail::MailService,
        products::ProductService,
        users::UserService,
    },
};

#[derive(Clone)]
pub struct ServiceContainer {
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    pub mail: Arc<MailService>,
    pub auth: Arc<AuthService>,
    pub products: Arc<ProductService>,
}

impl ServiceContainer {
    pub fn new(
        database: &Database,
        redis: Option<Arc<RedisClient>>,
        mail: MailService,
        jwt: JwtSettings,
        bcrypt_cost: u32,
    ) -> Self {
        let user_repo = Arc::new(UserRepository::new(database, redis));
        let product_repo = Arc::new(ProductRepository::new(database));

        let users = Arc::new(UserService::new(user_repo, bcrypt_cost));
        let tokens = Arc::new(TokenService::new(jwt));
        let mail = Arc::new(mail);
        let auth = Arc::new(AuthService::new(users.clone(), tokens.clone(), mail.clone()));
        let products = Arc::new(ProductService::new(product_repo));

        log::info!("🔧 서비스 컨테이너 구성 완료");

        Self {
            users,
            tokens,
            mail,
            auth,
            products,
        }
    }

    /// 모든 서비스를 앱 데이터로 등록합니다. `App::configure`에 넘겨 사용합니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.mail.clone()))
            .app_data(web::Data::from(self.auth.clone()))
            .app_data(web::Data::from(self.products.clone()));
    }
}
