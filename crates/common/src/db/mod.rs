//! Database connection management

pub mod models;
pub mod repository;

pub use repository::Repository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};

/// Connection pool with optional read replica.
///
/// Writes always go to the primary; reads prefer the replica when one is
/// configured.
#[derive(Clone)]
pub struct DbPool {
    primary: DatabaseConnection,
    replica: Option<DatabaseConnection>,
}

impl DbPool {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let primary = Self::open(&config.url, config).await?;
        info!("connected to primary database");

        let replica = match &config.read_url {
            Some(url) => {
                let conn = Self::open(url, config).await?;
                info!("connected to read replica");
                Some(conn)
            }
            None => None,
        };

        Ok(Self { primary, replica })
    }

    async fn open(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opts = ConnectOptions::new(url.to_owned());
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(false);

        Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: e.to_string(),
            })
    }

    /// Connection for writes
    pub fn writer(&self) -> &DatabaseConnection {
        &self.primary
    }

    /// Connection for reads; falls back to primary without a replica
    pub fn reader(&self) -> &DatabaseConnection {
        self.replica.as_ref().unwrap_or(&self.primary)
    }

    /// Liveness probe used by the readiness endpoint
    pub async fn ping(&self) -> Result<()> {
        self.primary
            .ping()
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: e.to_string(),
            })
    }
}
