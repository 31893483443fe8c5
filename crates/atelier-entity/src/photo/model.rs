//! Photo entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{PhotoId, ProjectId};

/// A gallery image belonging to exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    /// Unique photo identifier.
    pub id: PhotoId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Public URL of the stored image.
    pub image_url: String,
    /// When the photo was added.
    pub created_at: DateTime<Utc>,
}

/// Data required to register an uploaded photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhoto {
    /// Owning project.
    pub project_id: ProjectId,
    /// Public URL of the stored image.
    pub image_url: String,
}
