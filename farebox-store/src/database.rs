use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Row};
use std::time::Duration;
use tracing::info;

use farebox_core::{CreateItemRequest, ItemKind};

use crate::app_config::DatabaseConfig;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    /// Pool that only connects on first use. Handler tests exercise
    /// validation paths against the real router without a database.
    pub fn connect_lazy(url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(url)?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Creates a demo bus run with 50 numbered seats when the inventory is
    /// empty, so a fresh install has something to book against.
    pub async fn seed_demo_item(&self) -> Result<(), sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS item_count FROM items")
            .fetch_one(&self.pool)
            .await?;
        let item_count: i64 = row.get("item_count");
        if item_count > 0 {
            return Ok(());
        }

        let request = CreateItemRequest {
            name: "Riverside Express".to_string(),
            description: Some("Morning run from City A to City B".to_string()),
            location: Some("Central Station".to_string()),
            starts_at: None,
            kind: ItemKind::Seated,
            capacity: 50,
        };
        let item = crate::items::create_item(&self.pool, &request).await?;
        info!("Seeded demo item {} with {} seats", item.name, item.total_capacity);
        Ok(())
    }
}
