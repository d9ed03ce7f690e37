//! CLI module for Kat Corner
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `migrate`: apply (or revert) the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Kat Corner - a small site for keeping track of kats
#[derive(Parser)]
#[command(name = "kat-corner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply database migrations
    Migrate(migrate::MigrateArgs),
}
