use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;

use super::lookup_non_empty;

/// Connection settings for the database service.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub service_key: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database_url", &"[REDACTED]")
            .field("service_key", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// `None` when the endpoint or the service credential is missing.
    pub fn from_lookup<F>(lookup: &F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(database_url), Some(service_key)) = (
            lookup_non_empty(lookup, "DATABASE_URL"),
            lookup_non_empty(lookup, "DATABASE_SERVICE_KEY"),
        ) else {
            return Ok(None);
        };

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "20".to_string())
            .parse()
            .context("DB_MAX_CONNECTIONS must be a number")?;

        let min_connections = lookup("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|| "0".to_string())
            .parse()
            .context("DB_MIN_CONNECTIONS must be a number")?;

        let connect_timeout_secs = lookup("DB_CONNECT_TIMEOUT")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("DB_CONNECT_TIMEOUT must be a number of seconds")?;

        let idle_timeout_secs = lookup("DB_IDLE_TIMEOUT")
            .unwrap_or_else(|| "600".to_string())
            .parse()
            .context("DB_IDLE_TIMEOUT must be a number of seconds")?;

        Ok(Some(DatabaseConfig {
            database_url,
            service_key,
            max_connections,
            min_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        }))
    }

    /// Build the pool without connecting; the first query opens a connection.
    pub fn create_pool(&self) -> Result<PgPool> {
        let options = PgConnectOptions::from_str(&self.database_url)
            .context("DATABASE_URL is not a valid Postgres URL")?
            .password(&self.service_key);

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(Some(self.idle_timeout))
            .connect_lazy_with(options);

        Ok(pool)
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
