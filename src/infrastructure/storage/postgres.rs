//! PostgreSQL connection pool configuration

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StorageSettings;
use crate::domain::DomainError;

/// PostgreSQL pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/kat_corner".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build from application settings; the URL falls back to `DATABASE_URL`
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        let url = settings
            .database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| {
                DomainError::configuration(
                    "storage.database_url or DATABASE_URL is required for the postgres backend",
                )
            })?;

        Ok(Self {
            url,
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            connect_timeout_secs: settings.connect_timeout_secs,
        })
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Open a connection pool
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/test")
            .with_max_connections(20)
            .with_min_connections(5);

        assert_eq!(config.url, "postgres://localhost/test");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
    }

    #[test]
    fn test_from_settings_prefers_configured_url() {
        let settings = StorageSettings {
            backend: "postgres".to_string(),
            database_url: Some("postgres://db/kats".to_string()),
            max_connections: 4,
            ..Default::default()
        };

        let config = PostgresConfig::from_settings(&settings).unwrap();
        assert_eq!(config.url, "postgres://db/kats");
        assert_eq!(config.max_connections, 4);
    }
}
