//! Photo repository implementation.

use sqlx::{PgPool, QueryBuilder};

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::types::{PhotoId, ProjectId};
use atelier_entity::photo::{CreatePhoto, Photo};

/// Repository for project gallery photos.
#[derive(Debug, Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a photo by ID.
    pub async fn find_by_id(&self, id: PhotoId) -> AppResult<Option<Photo>> {
        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find photo", e))
    }

    /// List a project's gallery in upload order.
    pub async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<Photo>> {
        sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE project_id = $1 ORDER BY created_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list photos", e))
    }

    /// Insert a batch of photo rows in one statement (the upload
    /// pipeline's metadata commit).
    pub async fn create_batch(&self, photos: &[CreatePhoto]) -> AppResult<Vec<Photo>> {
        if photos.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new("INSERT INTO photos (project_id, image_url) ");
        builder.push_values(photos, |mut row, photo| {
            row.push_bind(photo.project_id).push_bind(&photo.image_url);
        });
        builder.push(" RETURNING *");

        builder
            .build_query_as::<Photo>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to save photo batch", e)
            })
    }

    /// Delete a photo row by its public URL. Returns affected rows.
    pub async fn delete_by_image_url(&self, image_url: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM photos WHERE image_url = $1")
            .bind(image_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete photo", e)
            })?;
        Ok(result.rows_affected())
    }
}
