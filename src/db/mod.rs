use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

use repositories::business::BusinessRepository;
use repositories::cache::CacheRepository;
use repositories::customer::CustomerRepository;
use repositories::order::OrderRepository;
use repositories::post::PostRepository;
use repositories::product::ProductRepository;
use repositories::search_history::SearchHistoryRepository;
use repositories::shop_service::ShopServiceRepository;
use repositories::user::UserRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn businesses(&self) -> BusinessRepository {
        BusinessRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn shop_services(&self) -> ShopServiceRepository {
        ShopServiceRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn cache(&self) -> CacheRepository {
        CacheRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn search_history(&self) -> SearchHistoryRepository {
        SearchHistoryRepository::new(self.conn.clone())
    }
}
