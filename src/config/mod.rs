//! Application configuration

mod app_config;
mod site;

pub use app_config::{AppConfig, LogFormat, LoggingConfig, ServerConfig, StorageSettings};
pub use site::{resolve_site_name, SiteSettings, DEFAULT_SITE_NAME, THE_APP_NAME};
