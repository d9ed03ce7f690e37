//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use super::migrations::run_migrations;
use super::postgres::PostgresConfig;
use crate::config::StorageSettings;
use crate::domain::kat::KatRepository;
use crate::domain::DomainError;
use crate::infrastructure::kat::{InMemoryKatRepository, PostgresKatRepository};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Factory for creating kat repositories
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Create the kat repository selected by the settings
    pub async fn create_kat_repository(
        settings: &StorageSettings,
    ) -> Result<Arc<dyn KatRepository>, DomainError> {
        let storage_type = StorageType::parse(&settings.backend).ok_or_else(|| {
            DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                settings.backend
            ))
        })?;

        info!(backend = ?storage_type, "Creating kat repository");

        match storage_type {
            StorageType::InMemory => Ok(Arc::new(InMemoryKatRepository::new())),
            StorageType::Postgres => {
                let pool = PostgresConfig::from_settings(settings)?.connect().await?;

                if settings.auto_migrate {
                    let applied = run_migrations(&pool).await?;
                    info!(applied, "Database migrations complete");
                }

                Ok(Arc::new(PostgresKatRepository::new(pool)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kat::KatQuery;

    #[test]
    fn test_storage_type_parse() {
        assert_eq!(StorageType::parse("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("postgres"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("postgresql"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("sqlite"), None);
    }

    #[tokio::test]
    async fn test_create_in_memory_repository() {
        let repository = StorageFactory::create_kat_repository(&StorageSettings::default())
            .await
            .unwrap();

        assert_eq!(repository.count(&KatQuery::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let settings = StorageSettings {
            backend: "sqlite".to_string(),
            ..Default::default()
        };

        let result = StorageFactory::create_kat_repository(&settings).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
