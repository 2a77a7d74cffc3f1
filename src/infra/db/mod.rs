//! Database connection and initialization.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Owns the connection pool and the migration lifecycle
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::connect_without_migrations(config).await?;
        database.run_migrations().await?;

        tracing::info!("Database connected and migrations applied");

        Ok(database)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(connect_options(&config.database_url)).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration with whether it has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.connection).await?;

        Ok(migrations
            .iter()
            .map(|m| {
                let applied = matches!(m.status(), MigrationStatus::Applied);
                (m.name().to_string(), applied)
            })
            .collect())
    }

    /// Drop every table and re-run all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

/// Pool options for a database URL.
///
/// An in-memory SQLite database lives inside a single connection, so the pool
/// is pinned to exactly one connection that never idles out.
fn connect_options(url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);

    if url.starts_with("sqlite::memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    } else {
        options
            .max_connections(10)
            .connect_timeout(Duration::from_secs(8));
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_migrates_and_pings() {
        let db = Database::connect(&Config::in_memory()).await.unwrap();
        db.ping().await.unwrap();

        let status = db.migration_status().await.unwrap();
        assert_eq!(status.len(), 2);
        assert!(status.iter().all(|(_, applied)| *applied));
    }
}
