//! Lightroom export command.

use std::path::PathBuf;

use clap::Args;

use atelier_core::error::AppError;
use atelier_core::types::ClientGalleryId;
use atelier_service::context::RequestContext;

use crate::output;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Client gallery ID to export
    #[arg(long)]
    pub gallery: uuid::Uuid,

    /// Write the list to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the export command
pub async fn execute(args: &ExportArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let state = atelier_api::app::build_state(config).await?;

    let ctx = RequestContext::admin(state.config.locale.default_locale, "cli");
    let list = state
        .export_service
        .lightroom_list(&ctx, ClientGalleryId::from(args.gallery))
        .await?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &list).await?;
            output::print_success(&format!("Export written to {}", path.display()));
        }
        None => println!("{list}"),
    }
    Ok(())
}
