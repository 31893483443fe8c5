//! Client photo entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{ClientGalleryId, ClientPhotoId};

/// A proof photo inside a client gallery.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientPhoto {
    /// Unique photo identifier.
    pub id: ClientPhotoId,
    /// Owning gallery.
    pub gallery_id: ClientGalleryId,
    /// Public URL of the stored image.
    pub image_url: String,
    /// File name as exported from the camera/catalog, kept for the
    /// Lightroom export.
    pub original_filename: Option<String>,
    /// When the photo was added.
    pub created_at: DateTime<Utc>,
}

/// Data required to register an uploaded client photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientPhoto {
    /// Owning gallery.
    pub gallery_id: ClientGalleryId,
    /// Public URL of the stored image.
    pub image_url: String,
    /// Original file name before sanitization/compression.
    pub original_filename: Option<String>,
}
