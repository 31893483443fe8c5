//! Client gallery CRUD and the public gallery view.

use std::sync::Arc;

use tracing::info;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::StorageProvider;
use atelier_core::types::ClientGalleryId;
use atelier_database::repositories::client_gallery::ClientGalleryRepository;
use atelier_database::repositories::client_photo::ClientPhotoRepository;
use atelier_database::repositories::selection::SelectionRepository;
use atelier_entity::client_gallery::{ClientGallery, ClientGalleryWithCounts, CreateClientGallery};
use atelier_entity::client_photo::ClientPhoto;
use atelier_entity::selection::ClientSelection;

use crate::context::RequestContext;
use crate::gallery::link::LinkService;

/// A gallery with its photos and the visiting client's selections,
/// seeded in one fetch when the gallery page opens.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GalleryView {
    /// The gallery record.
    pub gallery: ClientGallery,
    /// Photos in upload order.
    pub photos: Vec<ClientPhoto>,
    /// All selections the client has made so far.
    pub selections: Vec<ClientSelection>,
}

/// Manages client proofing galleries.
#[derive(Debug, Clone)]
pub struct GalleryService {
    /// Gallery repository.
    galleries: Arc<ClientGalleryRepository>,
    /// Client photo repository.
    client_photos: Arc<ClientPhotoRepository>,
    /// Selection repository.
    selections: Arc<SelectionRepository>,
    /// Share hash generator.
    link: LinkService,
    /// Storage provider, for best-effort object deletes.
    storage: Arc<dyn StorageProvider>,
}

impl GalleryService {
    /// Creates a new gallery service.
    pub fn new(
        galleries: Arc<ClientGalleryRepository>,
        client_photos: Arc<ClientPhotoRepository>,
        selections: Arc<SelectionRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            galleries,
            client_photos,
            selections,
            link: LinkService::new(),
            storage,
        }
    }

    /// Creates a gallery with a freshly generated share hash.
    pub async fn create_gallery(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> AppResult<ClientGallery> {
        ctx.require_admin()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Gallery name is required"));
        }

        let gallery = self
            .galleries
            .create(&CreateClientGallery {
                name: name.to_string(),
                share_hash: self.link.generate_share_hash(),
            })
            .await?;

        info!(gallery_id = %gallery.id, "Client gallery created");
        Ok(gallery)
    }

    /// Lists galleries with photo/like counts for the admin overview.
    pub async fn list_galleries(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<ClientGalleryWithCounts>> {
        ctx.require_admin()?;
        self.galleries.list_with_counts().await
    }

    /// Admin detail: gallery, photos, and everything the client has
    /// liked or commented.
    pub async fn gallery_detail(
        &self,
        ctx: &RequestContext,
        id: ClientGalleryId,
    ) -> AppResult<GalleryView> {
        ctx.require_admin()?;

        let gallery = self
            .galleries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Gallery not found"))?;
        self.view_of(gallery).await
    }

    /// Public view resolved by share hash — the hash is the only
    /// credential.
    pub async fn public_view(&self, share_hash: &str) -> AppResult<GalleryView> {
        let gallery = self
            .galleries
            .find_by_share_hash(share_hash)
            .await?
            .ok_or_else(|| AppError::not_found("Gallery not found"))?;
        self.view_of(gallery).await
    }

    async fn view_of(&self, gallery: ClientGallery) -> AppResult<GalleryView> {
        let photos = self.client_photos.find_by_gallery(gallery.id).await?;
        let selections = self.selections.find_by_client(&gallery.share_hash).await?;
        Ok(GalleryView {
            gallery,
            photos,
            selections,
        })
    }

    /// Deletes a gallery; photos and selections cascade away with it.
    pub async fn delete_gallery(
        &self,
        ctx: &RequestContext,
        id: ClientGalleryId,
    ) -> AppResult<()> {
        ctx.require_admin()?;

        let affected = self.galleries.delete(id).await?;
        if affected == 0 {
            return Err(AppError::precondition(
                "Nothing was deleted — the gallery no longer exists",
            ));
        }

        info!(gallery_id = %id, "Client gallery deleted");
        Ok(())
    }

    /// Deletes one proof photo by its public URL. Storage delete is
    /// best-effort; the database row is authoritative.
    pub async fn delete_photo(
        &self,
        ctx: &RequestContext,
        gallery_id: ClientGalleryId,
        image_url: &str,
    ) -> AppResult<()> {
        ctx.require_admin()?;

        let base = self.storage.public_url("");
        if let Some(path) = image_url.strip_prefix(&base).filter(|p| !p.is_empty()) {
            if let Err(e) = self.storage.delete(path).await {
                tracing::warn!(path, error = %e, "Failed to delete stored object");
            }
        }

        let affected = self.client_photos.delete_by_image_url(image_url).await?;
        if affected == 0 {
            return Err(AppError::not_found("Photo not found"));
        }

        info!(gallery_id = %gallery_id, "Client photo deleted");
        Ok(())
    }
}
