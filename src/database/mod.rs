//! SeaORM-based database implementation
//!
//! This module provides database-agnostic access using SeaORM with support for:
//! - SQLite (file-backed or in-memory)
//! - PostgreSQL
//! - MySQL
//!
//! Schema setup is an explicit step: call [`Database::migrate`] once during
//! startup before serving requests.

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database as SeaOrmDatabase, DatabaseConnection};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{DatabaseConfig, defaults::DEFAULT_MAX_CONNECTIONS};

pub mod migrations;
pub mod repositories;
pub mod session;

pub use session::DbSession;

/// Database connection manager with multi-database support
#[derive(Clone)]
pub struct Database {
    /// Pooled connection shared by every request session
    pub connection: Arc<DatabaseConnection>,
    /// Database type for specific optimizations
    pub database_type: DatabaseType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
    PostgreSQL,
    MySQL,
}

impl Database {
    /// Create a new database connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_type = Self::detect_database_type(&config.url)?;

        info!("Connecting to {} database", database_type.as_str());

        // For SQLite, modify URL to enable auto-creation if needed
        let connection_url = match database_type {
            DatabaseType::SQLite => Self::ensure_sqlite_auto_creation(&config.url)?,
            _ => config.url.clone(),
        };

        let mut connect_options = ConnectOptions::new(&connection_url);

        if Self::is_in_memory(&config.url) {
            // Every pooled connection to `:memory:` is a separate database, so pin the pool to one
            connect_options.max_connections(1).min_connections(1);
        } else {
            connect_options
                .max_connections(config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800));
        }

        connect_options
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(3))
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        let connection = match SeaOrmDatabase::connect(connect_options).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!("Database connection failed: {:?}", e);
                let mut source = e.source();
                let mut level = 0;
                while let Some(err) = source {
                    tracing::error!("  Level {}: {}", level, err);
                    source = err.source();
                    level += 1;
                }
                return Err(anyhow::anyhow!(
                    "Failed to connect to database at '{}': {}",
                    &config.url,
                    e
                ));
            }
        };

        debug!("Database connection established successfully");

        Ok(Self {
            connection: Arc::new(connection),
            database_type,
        })
    }

    /// Detect the database type from the URL
    fn detect_database_type(url: &str) -> Result<DatabaseType> {
        if url.starts_with("sqlite:") {
            Ok(DatabaseType::SQLite)
        } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
            Ok(DatabaseType::PostgreSQL)
        } else if url.starts_with("mysql:") {
            Ok(DatabaseType::MySQL)
        } else {
            anyhow::bail!("Unsupported database URL format: {}", url);
        }
    }

    fn is_in_memory(url: &str) -> bool {
        url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
    }

    /// Ensure SQLite URL includes auto-creation mode if needed
    fn ensure_sqlite_auto_creation(url: &str) -> Result<String> {
        if url.contains("mode=") || url.contains(":memory:") {
            debug!("SQLite URL needs no modification: {}", url);
            return Ok(url.to_string());
        }

        let file_path = if let Some(path) = url.strip_prefix("sqlite://") {
            path
        } else if let Some(path) = url.strip_prefix("sqlite:") {
            path
        } else {
            anyhow::bail!("Invalid SQLite URL format: {}", url);
        };
        // Drop any query string before touching the filesystem
        let file_path = file_path.split('?').next().unwrap_or(file_path);

        let path = std::path::Path::new(file_path);

        if path.exists() {
            debug!("SQLite database file already exists: {}", file_path);
            return Ok(url.to_string());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create directory for SQLite database: {}",
                    parent.display()
                )
            })?;
            info!("Created directory for SQLite database: {}", parent.display());
        }

        let auto_create_url = if url.contains('?') {
            format!("{}&mode=rwc", url)
        } else {
            format!("{}?mode=rwc", url)
        };

        info!(
            "Modified SQLite URL to enable auto-creation: {} -> {}",
            url, auto_create_url
        );
        Ok(auto_create_url)
    }

    /// Run database migrations
    ///
    /// Idempotent: already-applied migrations are skipped and every table is
    /// created with `IF NOT EXISTS`.
    pub async fn migrate(&self) -> Result<()> {
        use migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        info!(
            "Running database migrations for {}",
            self.database_type.as_str()
        );

        Migrator::up(&*self.connection, None)
            .await
            .context("Failed to run migrations")?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Open a request-scoped unit of work over the shared pool
    pub fn session(&self) -> DbSession {
        DbSession::new(self.connection.clone())
    }

    /// Check that the database answers
    pub async fn ping(&self) -> Result<()> {
        self.connection.ping().await.context("Database ping failed")
    }

    /// Get the main database connection
    pub fn connection(&self) -> Arc<DatabaseConnection> {
        self.connection.clone()
    }

    /// Get the database type
    pub fn database_type(&self) -> DatabaseType {
        self.database_type
    }
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::SQLite => "SQLite",
            DatabaseType::PostgreSQL => "PostgreSQL",
            DatabaseType::MySQL => "MySQL",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(5),
        }
    }

    #[test]
    fn test_detect_database_type() {
        assert_eq!(
            Database::detect_database_type("sqlite::memory:").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            Database::detect_database_type("postgresql://u:p@localhost/db").unwrap(),
            DatabaseType::PostgreSQL
        );
        assert_eq!(
            Database::detect_database_type("postgres://u:p@localhost/db").unwrap(),
            DatabaseType::PostgreSQL
        );
        assert_eq!(
            Database::detect_database_type("mysql://u:p@localhost/db").unwrap(),
            DatabaseType::MySQL
        );
        assert!(Database::detect_database_type("redis://localhost").is_err());
    }

    #[test]
    fn test_memory_url_is_untouched() {
        assert_eq!(
            Database::ensure_sqlite_auto_creation("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(Database::is_in_memory("sqlite::memory:"));
        assert!(!Database::is_in_memory("sqlite://./series-api.db"));
    }

    #[test]
    fn test_missing_sqlite_file_gets_rwc_mode() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("series.db");
        let url = format!("sqlite://{}", db_path.display());

        let rewritten = Database::ensure_sqlite_auto_creation(&url).unwrap();

        assert_eq!(rewritten, format!("{}?mode=rwc", url));
        assert!(db_path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let database = Database::new(&memory_config()).await.unwrap();

        database.migrate().await.unwrap();
        database.migrate().await.unwrap();

        database.ping().await.unwrap();
        assert_eq!(database.database_type(), DatabaseType::SQLite);
    }

    #[tokio::test]
    async fn test_file_backed_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("series.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: Some(2),
        };

        let database = Database::new(&config).await.unwrap();
        database.migrate().await.unwrap();

        assert!(db_path.exists());
    }
}
