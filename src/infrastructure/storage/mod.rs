//! Storage infrastructure - backend selection, connection pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{StorageFactory, StorageType};
pub use migrations::{kat_migrations, revert_last_migration, run_migrations, Migration, PostgresMigrator};
pub use postgres::PostgresConfig;
