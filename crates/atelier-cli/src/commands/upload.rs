//! Batch photo upload through the full pipeline.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use clap::Args;

use atelier_core::error::AppError;
use atelier_core::types::{ClientGalleryId, ProjectId};
use atelier_service::context::RequestContext;
use atelier_service::upload::pipeline::UploadFile;
use atelier_service::upload::progress::UploadProgress;

use crate::output::{self, OutputFormat};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Image files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Target client gallery ID
    #[arg(long, conflicts_with = "project")]
    pub gallery: Option<uuid::Uuid>,

    /// Target project ID
    #[arg(long, conflicts_with = "gallery")]
    pub project: Option<uuid::Uuid>,
}

/// Upload destination
enum Target {
    Gallery(ClientGalleryId),
    Project(ProjectId),
}

/// Execute the upload command
pub async fn execute(args: &UploadArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let target = match (args.gallery, args.project) {
        (Some(gallery), None) => Target::Gallery(ClientGalleryId::from(gallery)),
        (None, Some(project)) => Target::Project(ProjectId::from(project)),
        _ => {
            return Err(AppError::validation(
                "Specify a target with --gallery <id> or --project <id>",
            ))
        }
    };

    let mut batch = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let data = tokio::fs::read(file)
            .await
            .map_err(|e| AppError::validation(format!("Cannot read {}: {e}", file.display())))?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.jpg")
            .to_string();
        batch.push(UploadFile {
            file_name,
            data: Bytes::from(data),
        });
    }

    let config = super::load_config(env)?;
    let state = atelier_api::app::build_state(config).await?;

    let ctx = RequestContext::admin(
        state.config.locale.default_locale,
        "cli",
    );

    let progress = Arc::new(UploadProgress::new(batch.len()));
    let reporter = spawn_progress_reporter(Arc::clone(&progress));

    let result = match target {
        Target::Gallery(gallery) => state
            .upload_service
            .upload_batch_to_gallery(&ctx, gallery, batch, &progress)
            .await
            .map(|photos| serde_json::json!(photos)),
        Target::Project(project) => state
            .upload_service
            .upload_batch_to_project(&ctx, project, batch, &progress)
            .await
            .map(|photos| serde_json::json!(photos)),
    };

    reporter.abort();

    let photos = result?;
    let (completed, total) = progress.snapshot();
    output::print_success(&format!("Uploaded {completed}/{total} photos"));
    if format == OutputFormat::Json {
        output::print_item(&photos, format);
    }
    Ok(())
}

/// Prints `completed/total` whenever the counter moves.
fn spawn_progress_reporter(progress: Arc<UploadProgress>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = 0;
        loop {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let (completed, total) = progress.snapshot();
            if completed != last {
                println!("  {completed}/{total}");
                last = completed;
            }
            if completed >= total {
                break;
            }
        }
    })
}
