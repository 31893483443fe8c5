//! Upload orchestration: signed-URL issuance for browser uploads, the
//! batch metadata commits, and the full server-side pipeline used by
//! the CLI.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use atelier_core::config::storage::StorageConfig;
use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::{SignedUpload, StorageProvider};
use atelier_core::types::{ClientGalleryId, ProjectId};
use atelier_database::repositories::client_gallery::ClientGalleryRepository;
use atelier_database::repositories::client_photo::ClientPhotoRepository;
use atelier_database::repositories::photo::PhotoRepository;
use atelier_database::repositories::project::ProjectRepository;
use atelier_entity::client_photo::{ClientPhoto, CreateClientPhoto};
use atelier_entity::photo::{CreatePhoto, Photo};
use atelier_entity::project::Project;
use atelier_storage::image::ImageCompressor;

use crate::context::RequestContext;
use crate::upload::pipeline::{
    sanitize_file_name, HttpTransport, UploadFile, UploadPipeline,
};
use crate::upload::progress::UploadProgress;

/// A stored object handed back from a browser-side upload, ready to be
/// committed as a metadata row.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommittedUpload {
    /// Storage path returned when the signed URL was minted.
    pub path: String,
    /// Original file name (client photos keep it for the export).
    pub original_name: Option<String>,
}

/// Issues signed upload URLs and commits upload batches.
#[derive(Debug, Clone)]
pub struct UploadService {
    provider: Arc<dyn StorageProvider>,
    pipeline: UploadPipeline,
    projects: Arc<ProjectRepository>,
    photos: Arc<PhotoRepository>,
    galleries: Arc<ClientGalleryRepository>,
    client_photos: Arc<ClientPhotoRepository>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        config: &StorageConfig,
        projects: Arc<ProjectRepository>,
        photos: Arc<PhotoRepository>,
        galleries: Arc<ClientGalleryRepository>,
        client_photos: Arc<ClientPhotoRepository>,
    ) -> Self {
        let pipeline = UploadPipeline::new(
            Arc::clone(&provider),
            Arc::new(HttpTransport::new()),
            ImageCompressor::new(&config.image),
            config.max_upload_size_bytes,
        );
        Self {
            provider,
            pipeline,
            projects,
            photos,
            galleries,
            client_photos,
        }
    }

    /// Mint a signed upload URL for one project image.
    ///
    /// `is_main` selects the cover-image path prefix over the gallery
    /// one.
    pub async fn project_upload_url(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        file_name: &str,
        is_main: bool,
    ) -> AppResult<SignedUpload> {
        ctx.require_admin()?;
        self.require_project(project_id).await?;

        let folder = if is_main { "main" } else { "gallery" };
        let path = format!(
            "{project_id}/{folder}-{}-{}",
            Utc::now().timestamp_millis(),
            safe_name(file_name)?
        );
        self.provider.signed_upload_url(&path).await
    }

    /// Mint a signed upload URL for one client gallery photo.
    pub async fn client_upload_url(
        &self,
        ctx: &RequestContext,
        gallery_id: ClientGalleryId,
        file_name: &str,
    ) -> AppResult<SignedUpload> {
        ctx.require_admin()?;
        self.require_gallery(gallery_id).await?;

        let path = format!(
            "client-galleries/{gallery_id}/{}-{}",
            Utc::now().timestamp_millis(),
            safe_name(file_name)?
        );
        self.provider.signed_upload_url(&path).await
    }

    /// Commit uploaded gallery photos as metadata rows in one batch.
    pub async fn commit_project_photos(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        paths: &[String],
    ) -> AppResult<Vec<Photo>> {
        ctx.require_admin()?;
        self.require_project(project_id).await?;

        let rows: Vec<CreatePhoto> = paths
            .iter()
            .map(|path| CreatePhoto {
                project_id,
                image_url: self.provider.public_url(path),
            })
            .collect();

        let photos = self.photos.create_batch(&rows).await?;
        info!(project_id = %project_id, count = photos.len(), "Gallery photos committed");
        Ok(photos)
    }

    /// Commit an uploaded cover image: resolve its public URL and store
    /// it on the project.
    pub async fn commit_project_main(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        path: &str,
    ) -> AppResult<Project> {
        ctx.require_admin()?;

        let url = self.provider.public_url(path);
        let project = self.projects.set_main_image(project_id, Some(&url)).await?;
        info!(project_id = %project_id, "Cover image updated");
        Ok(project)
    }

    /// Commit uploaded client photos (with original filenames) in one
    /// batch.
    pub async fn commit_client_photos(
        &self,
        ctx: &RequestContext,
        gallery_id: ClientGalleryId,
        uploads: &[CommittedUpload],
    ) -> AppResult<Vec<ClientPhoto>> {
        ctx.require_admin()?;
        self.require_gallery(gallery_id).await?;

        let rows: Vec<CreateClientPhoto> = uploads
            .iter()
            .map(|upload| CreateClientPhoto {
                gallery_id,
                image_url: self.provider.public_url(&upload.path),
                original_filename: upload.original_name.clone(),
            })
            .collect();

        let photos = self.client_photos.create_batch(&rows).await?;
        info!(gallery_id = %gallery_id, count = photos.len(), "Client photos committed");
        Ok(photos)
    }

    /// Run the whole pipeline server-side for a client gallery (the CLI
    /// path): compress, presign, upload, then commit in one batch.
    pub async fn upload_batch_to_gallery(
        &self,
        ctx: &RequestContext,
        gallery_id: ClientGalleryId,
        files: Vec<UploadFile>,
        progress: &UploadProgress,
    ) -> AppResult<Vec<ClientPhoto>> {
        ctx.require_admin()?;
        self.require_gallery(gallery_id).await?;

        let prefix = format!("client-galleries/{gallery_id}/");
        let stored = self.pipeline.run(&prefix, files, progress).await?;

        let uploads: Vec<CommittedUpload> = stored
            .into_iter()
            .map(|object| CommittedUpload {
                path: object.path,
                original_name: Some(object.original_name),
            })
            .collect();
        self.commit_client_photos(ctx, gallery_id, &uploads).await
    }

    /// Run the whole pipeline server-side for a project gallery.
    pub async fn upload_batch_to_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        files: Vec<UploadFile>,
        progress: &UploadProgress,
    ) -> AppResult<Vec<Photo>> {
        ctx.require_admin()?;
        self.require_project(project_id).await?;

        let prefix = format!("{project_id}/gallery-");
        let stored = self.pipeline.run(&prefix, files, progress).await?;

        let paths: Vec<String> = stored.into_iter().map(|object| object.path).collect();
        self.commit_project_photos(ctx, project_id, &paths).await
    }

    async fn require_project(&self, project_id: ProjectId) -> AppResult<()> {
        self.projects
            .find_by_id(project_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Project not found"))
    }

    async fn require_gallery(&self, gallery_id: ClientGalleryId) -> AppResult<()> {
        self.galleries
            .find_by_id(gallery_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Gallery not found"))
    }
}

fn safe_name(file_name: &str) -> AppResult<String> {
    let safe = sanitize_file_name(file_name);
    if safe.is_empty() {
        return Err(AppError::validation(format!(
            "File name '{file_name}' has no usable characters"
        )));
    }
    Ok(safe)
}
