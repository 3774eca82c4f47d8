//! Database connection and initialization.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::repositories::{RoleRepository, RoleStore};

pub mod migrations;

pub use migrations::Migrator;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect, apply pending migrations and seed lookup data.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        Self::connect_with_options(options).await
    }

    /// Same as [`Database::connect`] with caller-supplied pool options.
    pub async fn connect_with_options(options: ConnectOptions) -> AppResult<Self> {
        let connection = SeaDatabase::connect(options).await?;
        let database = Self { connection };

        database.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;
        database.seed().await?;

        tracing::info!("Database connected and migrations applied");

        Ok(database)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Insert lookup rows the application expects to exist.
    ///
    /// Returns the number of roles inserted; zero once seeded.
    pub async fn seed(&self) -> AppResult<usize> {
        RoleStore::new(self.get_connection()).seed_defaults().await
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let migrations = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Drop all tables and run every migration again.
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

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_database() -> Database {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect_with_options(options).await.unwrap()
    }

    #[tokio::test]
    async fn test_connect_applies_migrations_and_seeds_roles() {
        let database = memory_database().await;

        database.ping().await.unwrap();

        let status = database.migration_status().await.unwrap();
        assert_eq!(status.len(), 3);
        assert!(status.iter().all(|(_, applied)| *applied));

        let roles = RoleStore::new(database.get_connection()).list().await.unwrap();
        let labels: Vec<_> = roles.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Project Manager", "Financial", "HRD"]);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let database = memory_database().await;
        assert_eq!(database.seed().await.unwrap(), 0);

        let roles = RoleStore::new(database.get_connection()).list().await.unwrap();
        assert_eq!(roles.len(), 3);
    }
}
