//! Client photo repository implementation.

use sqlx::{PgPool, QueryBuilder};

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::types::{ClientGalleryId, ClientPhotoId};
use atelier_entity::client_photo::{ClientPhoto, CreateClientPhoto};

/// Repository for photos inside client galleries.
#[derive(Debug, Clone)]
pub struct ClientPhotoRepository {
    pool: PgPool,
}

impl ClientPhotoRepository {
    /// Create a new client photo repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a client photo by ID.
    pub async fn find_by_id(&self, id: ClientPhotoId) -> AppResult<Option<ClientPhoto>> {
        sqlx::query_as::<_, ClientPhoto>("SELECT * FROM client_photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client photo", e)
            })
    }

    /// List a gallery's photos in upload order.
    pub async fn find_by_gallery(&self, gallery_id: ClientGalleryId) -> AppResult<Vec<ClientPhoto>> {
        sqlx::query_as::<_, ClientPhoto>(
            "SELECT * FROM client_photos WHERE gallery_id = $1 ORDER BY created_at ASC",
        )
        .bind(gallery_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list client photos", e)
        })
    }

    /// Insert a batch of client photo rows in one statement.
    pub async fn create_batch(&self, photos: &[CreateClientPhoto]) -> AppResult<Vec<ClientPhoto>> {
        if photos.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::new("INSERT INTO client_photos (gallery_id, image_url, original_filename) ");
        builder.push_values(photos, |mut row, photo| {
            row.push_bind(photo.gallery_id)
                .push_bind(&photo.image_url)
                .push_bind(&photo.original_filename);
        });
        builder.push(" RETURNING *");

        builder
            .build_query_as::<ClientPhoto>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to save client photo batch", e)
            })
    }

    /// List the photos a client has liked, for the Lightroom export.
    pub async fn find_liked(&self, client_id: &str) -> AppResult<Vec<ClientPhoto>> {
        sqlx::query_as::<_, ClientPhoto>(
            "SELECT p.* FROM client_photos p \
             INNER JOIN client_selections s ON s.photo_id = p.id \
             WHERE s.client_id = $1 AND s.is_liked \
             ORDER BY p.created_at ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list liked photos", e)
        })
    }

    /// Delete a client photo row by its public URL. Returns affected
    /// rows.
    pub async fn delete_by_image_url(&self, image_url: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM client_photos WHERE image_url = $1")
            .bind(image_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete client photo", e)
            })?;
        Ok(result.rows_affected())
    }
}
