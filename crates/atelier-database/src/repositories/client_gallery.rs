//! Client gallery repository implementation.

use sqlx::PgPool;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::types::ClientGalleryId;
use atelier_entity::client_gallery::{ClientGallery, ClientGalleryWithCounts, CreateClientGallery};

/// Repository for client proofing galleries.
#[derive(Debug, Clone)]
pub struct ClientGalleryRepository {
    pool: PgPool,
}

impl ClientGalleryRepository {
    /// Create a new client gallery repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a gallery by ID.
    pub async fn find_by_id(&self, id: ClientGalleryId) -> AppResult<Option<ClientGallery>> {
        sqlx::query_as::<_, ClientGallery>("SELECT * FROM client_galleries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find gallery", e))
    }

    /// Find a gallery by its share hash (the public access path).
    pub async fn find_by_share_hash(&self, share_hash: &str) -> AppResult<Option<ClientGallery>> {
        sqlx::query_as::<_, ClientGallery>(
            "SELECT * FROM client_galleries WHERE share_hash = $1",
        )
        .bind(share_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find gallery by hash", e)
        })
    }

    /// List galleries newest-first with photo and like counts for the
    /// admin overview.
    pub async fn list_with_counts(&self) -> AppResult<Vec<ClientGalleryWithCounts>> {
        sqlx::query_as::<_, ClientGalleryWithCounts>(
            "SELECT g.*, \
                (SELECT COUNT(*) FROM client_photos p WHERE p.gallery_id = g.id) AS photo_count, \
                (SELECT COUNT(*) FROM client_selections s \
                    WHERE s.client_id = g.share_hash AND s.is_liked) AS liked_count \
             FROM client_galleries g ORDER BY g.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list galleries", e))
    }

    /// Create a new gallery.
    pub async fn create(&self, data: &CreateClientGallery) -> AppResult<ClientGallery> {
        sqlx::query_as::<_, ClientGallery>(
            "INSERT INTO client_galleries (name, share_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.share_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("client_galleries_share_hash_key") =>
            {
                AppError::conflict("Share hash collision, please retry")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create gallery", e),
        })
    }

    /// Delete a gallery (cascades to photos and selections). Returns
    /// affected rows.
    pub async fn delete(&self, id: ClientGalleryId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM client_galleries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete gallery", e)
            })?;
        Ok(result.rows_affected())
    }
}
