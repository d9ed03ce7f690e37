//! Migrate command - applies the kat schema to PostgreSQL

use clap::Args;
use tracing::info;

use crate::cli::serve::load_config;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{revert_last_migration, run_migrations, PostgresConfig};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recent migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,

    /// Database URL (overrides storage.database_url and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run or revert migrations against the configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = load_config();
    init_logging(&config.logging);

    if args.database_url.is_some() {
        config.storage.database_url = args.database_url;
    }

    let pool = PostgresConfig::from_settings(&config.storage)?
        .with_max_connections(1)
        .with_min_connections(0)
        .connect()
        .await?;

    if args.revert {
        match revert_last_migration(&pool).await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        let applied = run_migrations(&pool).await?;
        info!(applied, "Migrations complete");
    }

    pool.close().await;

    Ok(())
}
