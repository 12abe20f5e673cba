//! Database module providing connection management, migrations, and queries.
//!
//! Each table gets its own file of `impl DbPool` query methods. Tables are
//! read independently; joins happen in `services::reconcile`.

pub mod admin_profiles;
pub mod model_runs;
pub mod orders;
pub mod physical_mail_orders;
pub mod print_orders;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database.url.clone());
        options
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply pending schema migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }
}
