//! Database migration commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use atelier_core::error::{AppError, ErrorKind};

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Show applied migrations instead of running pending ones
    #[arg(long)]
    pub status: bool,
}

/// One applied migration row
#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    /// Migration version
    version: i64,
    /// Migration description
    description: String,
}

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = atelier_database::connection::DatabasePool::connect(&config.database).await?;

    if args.status {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT version, description FROM _sqlx_migrations ORDER BY version ASC",
        )
        .fetch_all(pool.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read migration status", e)
        })?;

        let rows: Vec<MigrationRow> = rows
            .into_iter()
            .map(|(version, description)| MigrationRow {
                version,
                description,
            })
            .collect();
        output::print_list(&rows, format);
        return Ok(());
    }

    atelier_database::migration::run_migrations(pool.pool()).await?;
    output::print_success("Migrations applied");
    Ok(())
}
