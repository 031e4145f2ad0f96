use anyhow::{Context, Result};
use std::env;

use super::{lookup_non_empty, DatabaseConfig};
use crate::auth::{TokenVerifier, DEFAULT_AUDIENCE};

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database: Option<DatabaseConfig>,
    pub jwt_secret: Option<String>,
    pub jwt_audience: String,
    pub run_migrations: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("database", &self.database)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_audience", &self.jwt_audience)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Missing database or token settings are not an error here; requests
    /// that need them fail with a configuration error instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let jwt_audience =
            lookup_non_empty(&lookup, "JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());
        let run_migrations = lookup("RUN_MIGRATIONS")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(AppConfig {
            host,
            port,
            log_level,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt_secret: lookup_non_empty(&lookup, "JWT_SECRET"),
            jwt_audience,
            run_migrations,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_verifier(&self) -> Option<TokenVerifier> {
        self.jwt_secret
            .as_deref()
            .map(|secret| TokenVerifier::new(secret, &self.jwt_audience))
    }
}
