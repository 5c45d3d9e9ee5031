//! 관계형 데이터베이스 연결 관리
//!
//! sea-orm `DatabaseConnection`을 감싸 리포지토리에 공유합니다. 커넥션 풀 자체가
//! 내부적으로 `Arc`를 사용하므로 `Database`는 값싸게 복제할 수 있습니다.
//!
//! ## 사용 예제
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::connect(&DatabaseConfig::url(), DatabaseConfig::logging()).await?;
//! if DatabaseConfig::sync_schema() {
//!     database.sync_schema().await?;
//! }
//! ```

use std::time::Duration;

use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as OrmDatabase, DatabaseConnection, DbErr,
    EntityTrait, Schema,
};

use crate::domain::entities::{products::product, users::user};

#[derive(Clone)]
pub struct Database {
    conn: DatabaseConnection,
}

impl Database {
    /// 새 데이터베이스 연결을 생성하고 ping으로 검증합니다.
    pub async fn connect(url: &str, sql_logging: bool) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(url.to_owned());
        options
            .max_connections(crate::config::DatabaseConfig::max_connections())
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(sql_logging);

        let conn = OrmDatabase::connect(options).await?;
        conn.ping().await?;

        info!("✅ 데이터베이스 연결 성공: {:?}", conn.get_database_backend());

        Ok(Self { conn })
    }

    /// 단일 커넥션을 유지하는 인메모리 SQLite 데이터베이스
    ///
    /// 커넥션이 여러 개면 각자 별도의 메모리 DB를 보게 되므로 풀 크기를 1로 고정합니다.
    pub async fn in_memory() -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let conn = OrmDatabase::connect(options).await?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// 엔티티 정의 기준으로 누락된 테이블을 생성합니다. 이미 존재하는 테이블은 건드리지 않습니다.
    pub async fn sync_schema(&self) -> Result<(), DbErr> {
        self.create_table(user::Entity).await?;
        self.create_table(product::Entity).await?;

        info!("🗂️ 스키마 동기화 완료 (users, products)");
        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();

        self.conn.execute(backend.build(&statement)).await?;
        Ok(())
    }
}
