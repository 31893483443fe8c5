//! CLI command definitions and dispatch.

pub mod export;
pub mod hash_password;
pub mod migrate;
pub mod serve;
pub mod upload;

use clap::{Parser, Subcommand};

use atelier_core::config::AppConfig;
use atelier_core::error::AppError;

use crate::output::OutputFormat;

/// Atelier — photography portfolio and client proofing platform
#[derive(Debug, Parser)]
#[command(name = "atelier", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (reads config/default.toml plus
    /// config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Atelier server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Upload photos through the full pipeline
    Upload(upload::UploadArgs),
    /// Export liked filenames for Lightroom
    Export(export::ExportArgs),
    /// Hash an admin password for the configuration file
    HashPassword(hash_password::HashPasswordArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env, self.format).await,
            Commands::Upload(args) => upload::execute(args, &self.env, self.format).await,
            Commands::Export(args) => export::execute(args, &self.env).await,
            Commands::HashPassword(args) => hash_password::execute(args),
        }
    }
}

/// Helper: load configuration for the selected environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}
