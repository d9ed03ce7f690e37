//! Kat Corner
//!
//! A small site that keeps a list of kats (name and age), with:
//! - An admin change list that searches by name, filters by age and orders by name
//! - A greeting page naming the configured site
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = StorageFactory::create_kat_repository(&config.storage).await?;
    let site = config.site();

    info!(
        backend = %config.storage.backend,
        site = %site.site_name,
        "Application state initialised"
    );

    Ok(AppState::with_repository(repository, site))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_defaults() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.site.site_name, "Kat Corner");
        assert_eq!(state.kat_service.count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_app_state_with_site_name() {
        let config = AppConfig {
            the_site_name: Some("Custom Corner".to_string()),
            ..Default::default()
        };
        let state = create_app_state_with_config(&config).await.unwrap();

        assert_eq!(state.site.site_name, "Custom Corner");
        assert_eq!(state.site.app_name, "Kat Corner");
    }

    #[tokio::test]
    async fn test_create_app_state_rejects_unknown_backend() {
        let mut config = AppConfig::default();
        config.storage.backend = "sqlite".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
